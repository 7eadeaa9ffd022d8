//! Handlers for each [Command], and the dispatcher that picks one.

use crate::{
    cli::Command,
    credentials::CredentialStore,
    error::Failure,
    prompt::SecretPrompt,
    slack::{
        api::SlackClient,
        auth::SlackAccessToken,
        channel::ChannelName,
        message::MessageRequest,
    },
};
use tracing::info;

/// Collaborators handlers may reach for during one invocation.
pub struct Deps<'a> {
    pub slack_client: SlackClient,
    pub store: &'a dyn CredentialStore,
    pub prompt: &'a dyn SecretPrompt,
}

/// Run the handler registered for `cmd`. On success, returns the line to
/// show the user.
pub async fn dispatch(cmd: &Command, deps: &Deps<'_>) -> Result<String, Failure> {
    info!(command = cmd.name(), "dispatching");

    let res = match cmd {
        Command::Login => login(deps.prompt, deps.store),
        Command::PostMessage { message, channel } => {
            post_message(&deps.slack_client, deps.store, channel, message).await
        }
    };

    if let Err(e) = &res {
        info!(command = cmd.name(), error = %e, "command failed");
    }

    res
}

/// Ask for a token and store it, replacing any previous one.
fn login(prompt: &dyn SecretPrompt, store: &dyn CredentialStore) -> Result<String, Failure> {
    let answer = prompt.ask("Slack access token")?;
    let token = answer.trim();

    if token.is_empty() {
        return Err(Failure::Usage("No token given; nothing was stored.".into()));
    }

    store.set(&SlackAccessToken(token.into()))?;

    Ok("Logged in.".into())
}

/// Post `message` to `channel` with the stored token. Fails before touching
/// the network when there's no token.
async fn post_message(
    client: &SlackClient,
    store: &dyn CredentialStore,
    channel: &ChannelName,
    message: &str,
) -> Result<String, Failure> {
    let token = store.get()?.ok_or(Failure::NotLoggedIn)?;

    let res = client
        .post_message(
            &MessageRequest {
                channel,
                text: message,
            },
            &token,
        )
        .await?;

    Ok(match res.ts {
        Some(ts) => format!("Message posted to #{} (ts {}).", channel, ts),
        None => format!("Message posted to #{}.", channel),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{credentials::MemoryStore, prompt::CannedPrompt, slack::error::SlackError};
    use mockito::Matcher;
    use serde_json::json;
    use std::{
        io,
        sync::{Arc, Mutex},
    };
    use tracing::Level;

    /// Collects formatted log output for inspection.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Run a `postMessage` that fails for want of a token, with logs captured
    /// at `level`.
    async fn failing_post_logs(level: Level) -> String {
        let logs = Captured::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = MemoryStore::default();
        let prompt = no_prompt();
        let res = dispatch(&post("Hi", "general"), &deps("any".into(), &store, &prompt)).await;
        assert!(matches!(res, Err(Failure::NotLoggedIn)));

        logs.text()
    }

    async fn server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    fn post(message: &str, channel: &str) -> Command {
        Command::PostMessage {
            message: message.into(),
            channel: channel.parse().unwrap(),
        }
    }

    fn deps<'a>(
        base: String,
        store: &'a MemoryStore,
        prompt: &'a CannedPrompt,
    ) -> Deps<'a> {
        Deps {
            slack_client: SlackClient::new(base),
            store,
            prompt,
        }
    }

    fn no_prompt() -> CannedPrompt {
        CannedPrompt(Err(()))
    }

    #[tokio::test]
    async fn test_login_stores_trimmed_token() {
        let store = MemoryStore::default();
        let prompt = CannedPrompt(Ok("  xoxp-123\n".into()));

        let res = dispatch(&Command::Login, &deps("any".into(), &store, &prompt)).await;

        assert_eq!(res.unwrap(), "Logged in.");
        assert_eq!(store.get().unwrap(), Some(SlackAccessToken("xoxp-123".into())));
    }

    #[tokio::test]
    async fn test_login_replaces_token() {
        let store = MemoryStore::with_token("old");
        let prompt = CannedPrompt(Ok("new".into()));

        dispatch(&Command::Login, &deps("any".into(), &store, &prompt))
            .await
            .unwrap();

        assert_eq!(store.get().unwrap(), Some(SlackAccessToken("new".into())));
    }

    #[tokio::test]
    async fn test_login_empty_token() {
        let store = MemoryStore::with_token("old");
        let prompt = CannedPrompt(Ok("   ".into()));

        let res = dispatch(&Command::Login, &deps("any".into(), &store, &prompt)).await;

        assert!(matches!(res, Err(Failure::Usage(_))));
        assert_eq!(store.get().unwrap(), Some(SlackAccessToken("old".into())));
    }

    #[tokio::test]
    async fn test_login_prompt_failure() {
        let store = MemoryStore::default();
        let prompt = no_prompt();

        let res = dispatch(&Command::Login, &deps("any".into(), &store, &prompt)).await;

        assert!(matches!(res, Err(Failure::Prompt(_))));
        assert!(store.get().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_without_login_skips_network() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .expect(0)
            .create_async()
            .await;

        let store = MemoryStore::default();
        let prompt = no_prompt();
        let res = dispatch(&post("Hi", "general"), &deps(srv.url(), &store, &prompt)).await;

        msg_mock.assert_async().await;

        let e = res.unwrap_err();
        assert!(matches!(e, Failure::NotLoggedIn));
        assert!(e.to_string().contains("must be logged in"));
    }

    #[tokio::test]
    async fn test_post_success() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .match_header("authorization", "Bearer xoxb-foobar")
            .match_body(Matcher::Json(json!({
                "channel": "test2",
                "text": "Hello, World"
            })))
            .with_body(r#"{"ok": true, "channel": "C123", "ts": "1503435956.000247"}"#)
            .create_async()
            .await;

        let store = MemoryStore::with_token("xoxb-foobar");
        let prompt = no_prompt();
        let res = dispatch(
            &post("Hello, World", "#test2"),
            &deps(srv.url(), &store, &prompt),
        )
        .await;

        msg_mock.assert_async().await;

        assert_eq!(
            res.unwrap(),
            "Message posted to #test2 (ts 1503435956.000247)."
        );
    }

    #[tokio::test]
    async fn test_post_success_without_ts() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let store = MemoryStore::with_token("xoxb-foobar");
        let prompt = no_prompt();
        let res = dispatch(&post("Hi", "general"), &deps(srv.url(), &store, &prompt)).await;

        msg_mock.assert_async().await;

        assert_eq!(res.unwrap(), "Message posted to #general.");
    }

    #[tokio::test]
    async fn test_post_remote_error_passed_through() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": false, "error": "channel_not_found"}"#)
            .create_async()
            .await;

        let store = MemoryStore::with_token("xoxb-foobar");
        let prompt = no_prompt();
        let res = dispatch(&post("Hi", "nowhere"), &deps(srv.url(), &store, &prompt)).await;

        msg_mock.assert_async().await;

        let e = res.unwrap_err();
        assert_eq!(e.to_string(), "Slack API returned error: channel_not_found");
        match e {
            Failure::Slack(SlackError::APIResponseError(code)) => {
                assert_eq!(code, "channel_not_found")
            }
            other => panic!("expected a Slack API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_does_not_touch_store() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": false, "error": "invalid_auth"}"#)
            .create_async()
            .await;

        let store = MemoryStore::with_token("xoxb-revoked");
        let prompt = no_prompt();
        let res = dispatch(&post("Hi", "general"), &deps(srv.url(), &store, &prompt)).await;

        msg_mock.assert_async().await;

        assert!(res.is_err());
        assert_eq!(
            store.get().unwrap(),
            Some(SlackAccessToken("xoxb-revoked".into()))
        );
    }

    #[tokio::test]
    async fn test_failure_is_quiet_at_default_level() {
        assert_eq!(failing_post_logs(Level::WARN).await, "");
    }

    #[tokio::test]
    async fn test_failure_logged_when_verbose() {
        assert!(failing_post_logs(Level::INFO).await.contains("command failed"));
    }
}
