use crate::error::{unique_violation, Error, Result};
use crate::models::client::{Client, ClientSummary, NewClient};
use crate::utils::crypto::{hash_secret, secrets_match};
use crate::utils::token::{generate_api_key, generate_client_id};
use crate::utils::validation::normalize_email;
use sqlx::PgPool;

pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";
const EMAIL_UNIQUE_INDEX: &str = "clients_email_normalized_key";
const IDENTITY_CONSTRAINTS: [&str; 2] = ["clients_pkey", "clients_api_key_key"];
const IDENTITY_ATTEMPTS: u32 = 2;

#[derive(Clone)]
pub struct ClientService {
    pool: PgPool,
}

impl ClientService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers a client. The pre-check gives the common case a clean
    /// `Conflict`; the unique index settles concurrent signups.
    pub async fn create(&self, profile: NewClient, password: &str) -> Result<Client> {
        self.create_with(profile, password, || (generate_client_id(), generate_api_key()))
            .await
    }

    /// Like `create`, drawing `(client_id, api_key)` pairs from `next_identity`.
    /// A collision on either generated value is retried once with a fresh pair.
    pub async fn create_with(
        &self,
        profile: NewClient,
        password: &str,
        mut next_identity: impl FnMut() -> (String, String),
    ) -> Result<Client> {
        let email = normalize_email(&profile.email);
        if self.find_by_email(&email).await?.is_some() {
            return Err(Error::Conflict(EMAIL_ALREADY_REGISTERED.to_string()));
        }
        let password_hash = hash_secret(password);

        let mut attempt = 1;
        loop {
            let (client_id, api_key) = next_identity();
            let inserted = self
                .insert(&client_id, &email, &profile, &password_hash, &api_key)
                .await;
            let err = match inserted {
                Ok(client) => {
                    tracing::info!(client_id = %client.client_id, "client registered");
                    return Ok(client);
                }
                Err(e) => e,
            };

            match unique_violation(&err) {
                Some(constraint) if constraint == EMAIL_UNIQUE_INDEX => {
                    return Err(Error::Conflict(EMAIL_ALREADY_REGISTERED.to_string()));
                }
                Some(constraint)
                    if attempt < IDENTITY_ATTEMPTS
                        && IDENTITY_CONSTRAINTS.contains(&constraint.as_str()) =>
                {
                    tracing::warn!(constraint = %constraint, "generated client identity collided, retrying");
                    attempt += 1;
                }
                _ => return Err(Error::from(err)),
            }
        }
    }

    async fn insert(
        &self,
        client_id: &str,
        email: &str,
        profile: &NewClient,
        password_hash: &str,
        api_key: &str,
    ) -> std::result::Result<Client, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (
                client_id, email, full_name, date_of_birth, gender, country,
                education_level, occupation, handedness, notes,
                password_hash, api_key
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(email)
        .bind(&profile.full_name)
        .bind(profile.date_of_birth)
        .bind(&profile.gender)
        .bind(&profile.country)
        .bind(&profile.education_level)
        .bind(&profile.occupation)
        .bind(&profile.handedness)
        .bind(&profile.notes)
        .bind(password_hash)
        .bind(api_key)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"SELECT * FROM clients WHERE LOWER(BTRIM(email)) = $1"#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        Ok(client)
    }

    pub async fn find_by_id(&self, client_id: &str) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(r#"SELECT * FROM clients WHERE client_id = $1"#)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    /// Both the id and the key must match; callers cannot tell which one
    /// was wrong.
    pub async fn find_by_id_and_key(&self, client_id: &str, api_key: &str) -> Result<Option<Client>> {
        let client = self.find_by_id(client_id).await?;
        Ok(client.filter(|c| secrets_match(api_key, &c.api_key)))
    }

    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<Client>> {
        let digest = hash_secret(password);
        let client = self.find_by_email(email).await?;
        Ok(client.filter(|c| secrets_match(&digest, &c.password_hash)))
    }

    pub async fn record_login(&self, client_id: &str) -> Result<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET login_count = login_count + 1, last_login = NOW(), updated_at = NOW()
            WHERE client_id = $1
            RETURNING *
            "#,
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(client)
    }

    pub async fn list_summaries(&self) -> Result<Vec<ClientSummary>> {
        let clients = sqlx::query_as::<_, ClientSummary>(
            r#"SELECT client_id, full_name FROM clients ORDER BY full_name, client_id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }
}
