//! Integration tests for the role-gated handlers driven through the full handler chain.
//!
//! Uses an in-memory SQLite repository and MockBot; no Telegram traffic.

use std::sync::Arc;

use async_trait::async_trait;
use storage::{SqliteUserRepository, StorageError, UserRecord, UserRepository};
use tgbot::i18n::lang_from_code;
use tgbot::{
    admin_keyboard, build_handler_chain, Bot, BotError, HandlerChain, HandlerDeps, HandlerResponse,
};

use mock_bot::{create_test_message, MockBot};

async fn setup_with_repo(
    repo: Arc<dyn UserRepository>,
    admin_ids: Vec<i64>,
) -> (Arc<MockBot>, HandlerChain) {
    let bot = Arc::new(MockBot::new());
    let deps = HandlerDeps::new(bot.clone() as Arc<dyn Bot>, repo, lang_from_code("en"));
    let chain = build_handler_chain(&deps, admin_ids);
    (bot, chain)
}

async fn setup(admin_ids: Vec<i64>) -> (Arc<MockBot>, Arc<SqliteUserRepository>, HandlerChain) {
    let repo = Arc::new(
        SqliteUserRepository::new("sqlite::memory:")
            .await
            .expect("Failed to create repository"),
    );
    let (bot, chain) = setup_with_repo(repo.clone(), admin_ids).await;
    (bot, repo, chain)
}

/// **Test: configured admin gets the admin greeting with the admin keyboard, as a reply.**
#[tokio::test]
async fn test_admin_start_from_config() {
    let (bot, _repo, chain) = setup(vec![1]).await;

    let response = chain
        .handle(&create_test_message(1, "Ann", "/start"))
        .await
        .unwrap();

    let expected = "Hello Ann!\nYou in the admin panel";
    assert_eq!(response, HandlerResponse::Reply(expected.to_string()));

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, 1);
    assert_eq!(sent[0].text, expected);
    assert_eq!(sent[0].reply_to.as_deref(), Some("100"));
    assert_eq!(sent[0].keyboard, Some(admin_keyboard()));
}

/// **Test: admin stored in the admins table is recognized; `/start@bot` form works.**
#[tokio::test]
async fn test_admin_start_from_table() {
    let (bot, repo, chain) = setup(vec![]).await;
    repo.add_admin(2).await.unwrap();

    chain
        .handle(&create_test_message(2, "Ann", "/start@testbot"))
        .await
        .unwrap();

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.contains("admin panel"));
    assert!(sent[0].keyboard.is_some());
}

/// **Test: a regular user never reaches the admin handler; gets the user greeting instead.**
#[tokio::test]
async fn test_user_start_is_not_admin() {
    let (bot, _repo, chain) = setup(vec![1]).await;

    let response = chain
        .handle(&create_test_message(5, "Bob", "/start"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply("Hello, Bob!".to_string()));
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].keyboard.is_none());
    assert!(!sent[0].text.contains("admin panel"));
}

/// **Test: first contact stores the sender; plain text gets no reply.**
#[tokio::test]
async fn test_first_contact_registers_user() {
    let (bot, repo, chain) = setup(vec![]).await;

    let response = chain
        .handle(&create_test_message(9, "Eve", "hello"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert!(bot.sent().is_empty());

    let user = repo.get_user(9).await.unwrap().expect("User should be stored");
    assert_eq!(user.firstname, "Eve");
    assert_eq!(user.fullname, "Eve");
    assert_eq!(user.username.as_deref(), Some("user9"));
    assert_eq!(user.lang.as_deref(), Some("en"));
}

/// **Test: add_admin / del_admin commands update the table and report the outcome.**
#[tokio::test]
async fn test_add_and_del_admin_commands() {
    let (bot, repo, chain) = setup(vec![1]).await;

    chain
        .handle(&create_test_message(1, "Ann", "/add_admin 77"))
        .await
        .unwrap();
    assert!(repo.is_admin(77).await.unwrap());

    chain
        .handle(&create_test_message(1, "Ann", "/del_admin 77"))
        .await
        .unwrap();
    assert!(!repo.is_admin(77).await.unwrap());

    chain
        .handle(&create_test_message(1, "Ann", "/del_admin 77"))
        .await
        .unwrap();

    let texts: Vec<String> = bot.sent().into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            "User 77 is now an admin",
            "User 77 is no longer an admin",
            "User 77 is not an admin",
        ]
    );
}

/// **Test: an admin from ADMINS is not removed by /del_admin and keeps the admin panel.**
#[tokio::test]
async fn test_del_admin_keeps_configured_admin() {
    let (bot, repo, chain) = setup(vec![1]).await;
    repo.add_admin(1).await.unwrap();

    chain
        .handle(&create_test_message(1, "Ann", "/del_admin 1"))
        .await
        .unwrap();
    chain
        .handle(&create_test_message(1, "Ann", "/start"))
        .await
        .unwrap();

    let texts: Vec<String> = bot.sent().into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            "User 1 is configured in ADMINS and stays an admin",
            "Hello Ann!\nYou in the admin panel",
        ]
    );
    assert!(repo.is_admin(1).await.unwrap());
}

/// **Test: bad argument gets the usage text and changes nothing.**
#[tokio::test]
async fn test_add_admin_bad_argument() {
    let (bot, repo, chain) = setup(vec![1]).await;

    chain
        .handle(&create_test_message(1, "Ann", "/add_admin abc"))
        .await
        .unwrap();

    assert!(repo.list_admins().await.unwrap().iter().all(|&id| id == 1));
    assert_eq!(bot.sent()[0].text, "Usage: /add_admin <user_id>");
}

/// **Test: non-admin admin commands are filtered out; nothing is sent or stored.**
#[tokio::test]
async fn test_user_cannot_add_admin() {
    let (bot, repo, chain) = setup(vec![1]).await;

    let response = chain
        .handle(&create_test_message(5, "Bob", "/add_admin 5"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert!(bot.sent().is_empty());
    assert!(!repo.is_admin(5).await.unwrap());
}

/// **Test: /users lists every registered user.**
#[tokio::test]
async fn test_users_command_lists_users() {
    let (bot, repo, chain) = setup(vec![1]).await;
    repo.add_user(2, "Bob", "Bob B", Some("B"), Some("bob"), Some("ru"))
        .await
        .unwrap();

    chain
        .handle(&create_test_message(1, "Ann", "/users"))
        .await
        .unwrap();

    let text = &bot.sent()[0].text;
    assert!(text.starts_with("Users: 2\n"));
    assert!(text.contains("1 Ann @user1 [en]"));
    assert!(text.contains("2 Bob B @bob [ru]"));
}

/// **Test: /users header counts every user while the listing is capped.**
#[tokio::test]
async fn test_users_command_caps_listing() {
    let (bot, repo, chain) = setup(vec![1]).await;
    for id in 100..160 {
        repo.add_user(id, "U", "U", None, None, None).await.unwrap();
    }

    chain
        .handle(&create_test_message(1, "Ann", "/users"))
        .await
        .unwrap();

    let text = &bot.sent()[0].text;
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Users: 61"));
    assert_eq!(lines.count(), 50);
}

/// **Test: /lang stores the language; later replies use it.**
#[tokio::test]
async fn test_lang_changes_reply_language() {
    let (bot, repo, chain) = setup(vec![1]).await;

    chain
        .handle(&create_test_message(1, "Ann", "/lang ru"))
        .await
        .unwrap();
    assert_eq!(
        repo.get_user(1).await.unwrap().unwrap().lang.as_deref(),
        Some("ru")
    );

    chain
        .handle(&create_test_message(1, "Ann", "/start"))
        .await
        .unwrap();

    let sent = bot.sent();
    assert_eq!(sent[0].text, "Язык изменён: Русский");
    assert_eq!(sent[1].text, "Привет Ann!\nТы в админ панели");
}

/// **Test: unsupported /lang code gets the usage text and keeps the stored language.**
#[tokio::test]
async fn test_lang_unsupported_code() {
    let (bot, repo, chain) = setup(vec![]).await;

    chain
        .handle(&create_test_message(3, "Cid", "/lang xx"))
        .await
        .unwrap();

    assert_eq!(bot.sent()[0].text, "Usage: /lang <code>\nSupported: en, ru");
    assert_eq!(
        repo.get_user(3).await.unwrap().unwrap().lang.as_deref(),
        Some("en")
    );
}

/// Repository that fails the named operations and delegates the rest to SQLite.
struct FailingRepository {
    inner: SqliteUserRepository,
    failing: &'static [&'static str],
}

impl FailingRepository {
    async fn new(failing: &'static [&'static str]) -> Self {
        let inner = SqliteUserRepository::new("sqlite::memory:").await.unwrap();
        Self { inner, failing }
    }

    fn check(&self, op: &str) -> Result<(), StorageError> {
        if self.failing.iter().any(|f| *f == op) {
            return Err(StorageError::Database(format!("{}: connection lost", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FailingRepository {
    async fn add_user(
        &self,
        user_id: i64,
        firstname: &str,
        fullname: &str,
        lastname: Option<&str>,
        username: Option<&str>,
        lang: Option<&str>,
    ) -> Result<(), StorageError> {
        self.check("add_user")?;
        self.inner
            .add_user(user_id, firstname, fullname, lastname, username, lang)
            .await
    }
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        self.check("get_user")?;
        self.inner.get_user(user_id).await
    }
    async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError> {
        self.check("list_users")?;
        self.inner.list_users().await
    }
    async fn count_users(&self) -> Result<i64, StorageError> {
        self.check("count_users")?;
        self.inner.count_users().await
    }
    async fn update_user_lang(&self, user_id: i64, lang: &str) -> Result<(), StorageError> {
        self.check("update_user_lang")?;
        self.inner.update_user_lang(user_id, lang).await
    }
    async fn add_admin(&self, user_id: i64) -> Result<(), StorageError> {
        self.check("add_admin")?;
        self.inner.add_admin(user_id).await
    }
    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError> {
        self.check("is_admin")?;
        self.inner.is_admin(user_id).await
    }
    async fn list_admins(&self) -> Result<Vec<i64>, StorageError> {
        self.check("list_admins")?;
        self.inner.list_admins().await
    }
    async fn del_admin(&self, user_id: i64) -> Result<u64, StorageError> {
        self.check("del_admin")?;
        self.inner.del_admin(user_id).await
    }
}

/// **Test: failed role lookup skips the admin handler without surfacing an error.**
#[tokio::test]
async fn test_role_lookup_failure_skips_admin_handler() {
    let repo = FailingRepository::new(&["is_admin"]).await;
    repo.inner.add_admin(4).await.unwrap();
    let (bot, chain) = setup_with_repo(Arc::new(repo), vec![]).await;

    let response = chain
        .handle(&create_test_message(4, "Dan", "/start"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply("Hello, Dan!".to_string()));
    assert!(bot.sent()[0].keyboard.is_none());
}

/// **Test: a failed registration insert is returned by the chain and nothing is sent.**
#[tokio::test]
async fn test_add_user_failure_is_returned() {
    let repo = FailingRepository::new(&["add_user"]).await;
    let (bot, chain) = setup_with_repo(Arc::new(repo), vec![1]).await;

    let result = chain.handle(&create_test_message(1, "Ann", "/start")).await;

    match result {
        Err(BotError::Database(msg)) => assert!(msg.contains("add_user: connection lost")),
        other => panic!("expected a database error, got {:?}", other),
    }
    assert!(bot.sent().is_empty());
}

/// **Test: a failed language update is returned by the chain and nothing is sent.**
#[tokio::test]
async fn test_update_user_lang_failure_is_returned() {
    let repo = FailingRepository::new(&["update_user_lang"]).await;
    let (bot, chain) = setup_with_repo(Arc::new(repo), vec![]).await;

    let result = chain.handle(&create_test_message(3, "Cid", "/lang ru")).await;

    assert!(matches!(result, Err(BotError::Database(_))));
    assert!(bot.sent().is_empty());
}

/// **Test: a failed admin removal is returned by the chain and nothing is sent.**
#[tokio::test]
async fn test_del_admin_failure_is_returned() {
    let repo = FailingRepository::new(&["del_admin"]).await;
    repo.inner.add_admin(1).await.unwrap();
    repo.inner.add_admin(7).await.unwrap();
    let (bot, chain) = setup_with_repo(Arc::new(repo), vec![]).await;

    let result = chain.handle(&create_test_message(1, "Ann", "/del_admin 7")).await;

    assert!(matches!(result, Err(BotError::Database(_))));
    assert!(bot.sent().is_empty());
}
