//! Public registry lookups (CEP and CNPJ) backed by BrasilAPI
//!
//! Input validation happens before any request goes out: a malformed code
//! never reaches the wire. Remote responses are normalized into the flat
//! address/company shapes the client forms consume.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::LookupConfig;
use crate::errors::{AppError, Result};
use crate::formatters::digits;

/// Normalized postal address returned by a CEP lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Normalized company record returned by a CNPJ lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyLookup {
    pub company_name: String,
    pub trade_name: String,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub zip_code: String,
    pub city: String,
    pub state: String,
    pub registration_status: String,
}

#[derive(Debug, Deserialize)]
struct CepResponse {
    #[serde(default)]
    street: String,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
}

#[derive(Debug, Deserialize)]
struct CnpjResponse {
    #[serde(default)]
    razao_social: String,
    #[serde(default)]
    nome_fantasia: String,
    #[serde(default)]
    ddd_telefone_1: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    numero: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    cep: String,
    #[serde(default)]
    municipio: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    descricao_situacao_cadastral: String,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    #[serde(default)]
    message: String,
}

/// HTTP client for the public lookup API
#[derive(Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl LookupClient {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("failed to build lookup client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Looks up a postal code. Accepts masked or bare input; exactly 8
    /// digits are required.
    pub async fn fetch_cep(&self, cep: &str) -> Result<Address> {
        let clean = digits(cep);
        if clean.len() != 8 {
            return Err(AppError::LookupInvalid {
                message: "CEP inválido. Digite 8 números.".into(),
            });
        }

        let url = format!("{}/api/cep/v2/{}", self.base_url, clean);
        debug!(cep = %clean, "fetching CEP");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            // the registry answers with an error document for any miss
            return Err(AppError::LookupNotFound {
                message: "CEP não encontrado".into(),
            });
        }

        let body: CepResponse = response.json().await?;
        Ok(Address {
            street: body.street,
            neighborhood: body.neighborhood,
            city: body.city,
            state: body.state,
        })
    }

    /// Looks up a company registration. Accepts masked or bare input;
    /// exactly 14 digits are required.
    pub async fn fetch_cnpj(&self, cnpj: &str) -> Result<CompanyLookup> {
        let clean = digits(cnpj);
        if clean.len() != 14 {
            return Err(AppError::LookupInvalid {
                message: "CNPJ inválido. Digite 14 números.".into(),
            });
        }

        let url = format!("{}/api/cnpj/v1/{}", self.base_url, clean);
        debug!(cnpj = %clean, "fetching CNPJ");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::LookupNotFound {
                message: "CNPJ não encontrado".into(),
            });
        }
        if !status.is_success() {
            // the registry explains rejections in the body
            let remote: RemoteError = response.json().await.unwrap_or(RemoteError {
                message: String::new(),
            });
            let message = if remote.message.is_empty() {
                format!("CNPJ lookup returned status {status}")
            } else {
                remote.message
            };
            return Err(AppError::LookupFailed { message });
        }

        let body: CnpjResponse = response.json().await?;
        Ok(CompanyLookup {
            company_name: body.razao_social,
            trade_name: body.nome_fantasia,
            phone: body.ddd_telefone_1,
            email: body.email.unwrap_or_default(),
            street: body.logradouro,
            number: body.numero,
            neighborhood: body.bairro,
            zip_code: body.cep,
            city: body.municipio,
            state: body.uf,
            registration_status: body.descricao_situacao_cadastral,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LookupClient {
        LookupClient::new(&LookupConfig {
            base_url: "https://brasilapi.invalid".into(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn cep_with_wrong_length_is_rejected_without_io() {
        let err = client().fetch_cep("1234567").await.unwrap_err();
        assert!(matches!(err, AppError::LookupInvalid { .. }));

        let err = client().fetch_cep("123456789").await.unwrap_err();
        assert!(matches!(err, AppError::LookupInvalid { .. }));
    }

    #[tokio::test]
    async fn cep_accepts_masked_input() {
        // "88301-000" strips to 8 digits, so validation passes and the
        // request fails only because the host does not resolve
        let err = client().fetch_cep("88301-000").await.unwrap_err();
        assert!(!matches!(err, AppError::LookupInvalid { .. }));
    }

    #[tokio::test]
    async fn cnpj_with_wrong_length_is_rejected_without_io() {
        let err = client().fetch_cnpj("123").await.unwrap_err();
        assert!(matches!(err, AppError::LookupInvalid { .. }));
    }

    #[tokio::test]
    async fn cnpj_accepts_masked_input() {
        let err = client()
            .fetch_cnpj("12.345.678/0001-90")
            .await
            .unwrap_err();
        assert!(!matches!(err, AppError::LookupInvalid { .. }));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let c = LookupClient::new(&LookupConfig {
            base_url: "https://brasilapi.com.br/".into(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(c.base_url, "https://brasilapi.com.br");
    }
}
