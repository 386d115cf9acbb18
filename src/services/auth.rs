// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Resource},
    db::UserRepository,
    models::auth::{Claims, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self { user_repo, jwt_secret, pool }
    }

    /// Cria uma conta (usado pelo painel e pelo bootstrap do administrador).
    pub async fn create_user(&self, email: &str, password: &str, is_staff: bool) -> Result<User, AppError> {
        // Hashing fora do runtime assíncrono
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
            ?;

        let user = self.user_repo
            .create_user(&self.pool, email.trim(), &hashed_password, is_staff)
            .await?;

        tracing::info!("👤 Conta criada: {} (staff: {})", user.email, user.is_staff);
        Ok(user)
    }

    /// Garante que a conta administrativa inicial exista. Não altera conta já existente.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            tracing::debug!("Conta administrativa {} já existe", email);
            return Ok(());
        }

        self.create_user(email, password, true).await?;
        tracing::info!("✅ Conta administrativa inicial criada: {}", email);
        Ok(())
    }

    pub async fn search_users(&self, term: Option<&str>) -> Result<Vec<User>, AppError> {
        self.user_repo.search(term, 20).await
    }

    /// Remove a conta; o plantonista vinculado fica sem usuário.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        if !self.user_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Resource::User));
        }

        tracing::info!("🗑️ Conta {} removida", id);
        Ok(())
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self.user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            tracing::warn!("Tentativa de login inválida para {}", user.email);
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let user_id = decode_token(token, &self.jwt_secret)?;

        // Conta apagada depois da emissão do token: o token deixa de valer
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        encode_token(user_id, &self.jwt_secret)
    }
}

pub(crate) fn encode_token(user_id: Uuid, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(7);

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub(crate) fn decode_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidToken)?;

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_the_subject() {
        let id = Uuid::new_v4();
        let token = encode_token(id, "segredo").unwrap();
        assert_eq!(decode_token(&token, "segredo").unwrap(), id);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = encode_token(Uuid::new_v4(), "segredo").unwrap();
        assert!(matches!(decode_token(&token, "outro"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(decode_token("abc.def.ghi", "segredo"), Err(AppError::InvalidToken)));
    }
}
