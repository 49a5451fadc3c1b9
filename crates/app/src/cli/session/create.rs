use clap::Args;
use jiff::Timestamp;
use qrcodes_app::{
    database,
    domain::sessions::{
        PgSessionsService, data::NewSession, generate_bearer_token, records::ShopDomain,
    },
};
use uuid::Uuid;

use crate::cli::CLI_MAX_CONNECTIONS;

#[derive(Debug, Args)]
pub(crate) struct CreateSessionArgs {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Shop domain, e.g. `example.myshopify.com`
    #[arg(long)]
    shop: String,

    /// Offline Admin API access token for the shop
    #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    /// Raw bearer token; generated when omitted
    #[arg(long)]
    token: Option<String>,

    /// Session expiry (RFC 3339); permanent when omitted
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

impl CreateSessionArgs {
    fn validate(&self, now: Timestamp) -> Result<(), String> {
        if self.shop.trim().is_empty() {
            return Err("shop cannot be empty".to_string());
        }

        if let Some(expires_at) = self.expires_at
            && expires_at <= now
        {
            return Err("expires-at must be in the future".to_string());
        }

        if self.token.as_deref().is_some_and(|token| token.trim().is_empty()) {
            return Err("token cannot be empty".to_string());
        }

        Ok(())
    }
}

pub(crate) async fn run(args: CreateSessionArgs) -> Result<(), String> {
    args.validate(Timestamp::now())?;

    let bearer_token = args.token.unwrap_or_else(generate_bearer_token);

    let pool = database::connect(&args.database_url, CLI_MAX_CONNECTIONS)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let session = PgSessionsService::new(pool)
        .create_session(NewSession {
            uuid: Uuid::now_v7(),
            shop: ShopDomain::new(args.shop.trim()),
            access_token: args.access_token,
            bearer_token: bearer_token.clone(),
            expires_at: args.expires_at,
        })
        .await
        .map_err(|error| format!("failed to create session: {error}"))?;

    #[expect(clippy::print_stdout, reason = "the token is the command's output")]
    {
        println!("session_uuid: {}", session.uuid);
        println!("shop: {}", session.shop);

        if let Some(expires_at) = session.expires_at {
            println!("expires_at: {expires_at}");
        }

        println!("bearer_token: {bearer_token}");
        println!("store this token now; it is only shown once");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    fn args() -> CreateSessionArgs {
        CreateSessionArgs {
            database_url: "postgres://localhost/qrcodes".to_string(),
            shop: "example.myshopify.com".to_string(),
            access_token: "shpat_test".to_string(),
            token: None,
            expires_at: None,
        }
    }

    #[test]
    fn accepts_shop_with_generated_token() {
        assert_eq!(args().validate(Timestamp::UNIX_EPOCH), Ok(()));
    }

    #[test]
    fn accepts_explicit_token_and_future_expiry() {
        let now = Timestamp::UNIX_EPOCH;
        let args = CreateSessionArgs {
            token: Some("qrs_fixed".to_string()),
            expires_at: Some(now + SignedDuration::from_hours(1)),
            ..args()
        };

        assert_eq!(args.validate(now), Ok(()));
    }

    #[test]
    fn rejects_blank_shop() {
        let args = CreateSessionArgs {
            shop: "  ".to_string(),
            ..args()
        };

        assert_eq!(
            args.validate(Timestamp::UNIX_EPOCH),
            Err("shop cannot be empty".to_string())
        );
    }

    #[test]
    fn rejects_expiry_that_is_not_in_the_future() {
        let now = Timestamp::UNIX_EPOCH + SignedDuration::from_hours(1);
        let args = CreateSessionArgs {
            expires_at: Some(now),
            ..args()
        };

        assert_eq!(
            args.validate(now),
            Err("expires-at must be in the future".to_string())
        );
    }

    #[test]
    fn rejects_blank_token() {
        let args = CreateSessionArgs {
            token: Some(String::new()),
            ..args()
        };

        assert_eq!(
            args.validate(Timestamp::UNIX_EPOCH),
            Err("token cannot be empty".to_string())
        );
    }
}
