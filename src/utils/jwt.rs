//! Bearer 令牌的签发与校验
//!
//! 令牌为 HS512 签名的 JWT，只包含 `sub`、`iat`、`exp`。服务端不保存令牌，
//! 每次请求都用 [`JwtUtils`] 持有的密钥重新校验签名和过期时间。

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户邮箱
    pub iat: i64,    // 签发时间
    pub exp: i64,    // 过期时间
}

/// 令牌检查结果，只有 [`TokenStatus::Valid`] 视为通过
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Expired,
    Malformed,
}

pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl JwtUtils {
    pub fn new(secret: &str, validity: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            validity,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration())
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// 为已认证的主体签发令牌
    pub fn issue(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(
                i64::try_from(self.validity.as_secs()).unwrap_or(i64::MAX),
            ),
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS512), claims, &self.encoding_key)
    }

    pub fn inspect(&self, token: &str) -> TokenStatus {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(_) => TokenStatus::Valid,
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("JWT token is expired");
                    TokenStatus::Expired
                }
                ErrorKind::InvalidSignature => {
                    tracing::warn!("Invalid JWT signature");
                    TokenStatus::Malformed
                }
                other => {
                    tracing::debug!("Rejected JWT token: {:?}", other);
                    TokenStatus::Malformed
                }
            },
        }
    }

    /// 不会出错：任何无效令牌都返回 `false`
    pub fn validate(&self, token: &str) -> bool {
        self.inspect(token) == TokenStatus::Valid
    }

    /// 调用前应先通过 [`JwtUtils::validate`]
    pub fn extract_subject(&self, token: &str) -> Result<String, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims.sub)
    }
}
