//! VendorClient - Client HTTP condiviso verso la REST API Twilio
//!
//! Gestisce autenticazione (basic auth con API key), codifica form dei parametri,
//! decodifica JSON delle risposte e traduzione delle risposte di errore in [`VendorError`].

use crate::dtos::VendorErrorDTO;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Codice di errore del fornitore per "risorsa non trovata"
pub const NOT_FOUND_CODE: u32 = 20404;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Error)]
#[error("vendor request failed (http status {status:?}, code {code:?}): {message}")]
pub struct VendorError {
    /// Status HTTP della risposta, assente per errori di trasporto
    pub status: Option<u16>,
    /// Codice di errore specifico del fornitore (es. 20404)
    pub code: Option<u32>,
    pub message: String,
    pub more_info: Option<String>,
}

impl VendorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
            more_info: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Some(NOT_FOUND_CODE)
    }

    /// Vero se il fornitore ha risposto (4xx/5xx) e non si tratta di un errore di rete
    pub fn is_vendor_response(&self) -> bool {
        self.status.is_some()
    }
}

impl From<reqwest::Error> for VendorError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Client HTTP autenticato. È economico da clonare: `reqwest::Client` condivide il pool interno.
#[derive(Clone, Debug)]
pub struct VendorClient {
    http: Client,
    api_key_sid: String,
    api_key_secret: String,
}

impl VendorClient {
    pub fn new(api_key_sid: String, api_key_secret: String) -> Result<Self, VendorError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key_sid,
            api_key_secret,
        })
    }

    /// Costruisce l'URL di una risorsa aggiungendo i segmenti al base url.
    /// I segmenti vengono percent-encoded, quindi un nome di room con spazi resta un solo segmento.
    pub fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, VendorError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| VendorError::new(format!("Invalid vendor base url {}: {}", base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| VendorError::new(format!("Vendor base url cannot be a base: {}", base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, VendorError> {
        debug!("GET {}", url);
        let response = self.send(self.http.get(url)).await?;
        Self::decode(response).await
    }

    pub async fn post_form<F, T>(&self, url: Url, form: &F) -> Result<T, VendorError>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {}", url);
        let response = self.send(self.http.post(url).form(form)).await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, url: Url) -> Result<(), VendorError> {
        debug!("DELETE {}", url);
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    /// Decodifica una risposta 2xx. Un body non valido resta un errore del fornitore,
    /// con lo status HTTP ricevuto, e non un errore di rete.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, VendorError> {
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            warn!("Undecodable vendor response (http {}): {}", status, e);
            VendorError {
                status: Some(status),
                code: None,
                message: format!("Invalid vendor response: {}", e),
                more_info: None,
            }
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, VendorError> {
        let response = request
            .basic_auth(&self.api_key_sid, Some(&self.api_key_secret))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // il corpo di errore può mancare o non essere JSON (es. 502 da un proxy)
        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<VendorErrorDTO>(&body).ok();
        let error = match parsed {
            Some(dto) => VendorError {
                status: Some(status.as_u16()),
                code: dto.code,
                message: dto
                    .message
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
                more_info: dto.more_info,
            },
            None => VendorError {
                status: Some(status.as_u16()),
                code: None,
                message: format!("HTTP {}", status),
                more_info: None,
            },
        };

        if error.is_not_found() {
            debug!("Vendor resource not found: {}", error.message);
        } else {
            warn!("Vendor returned error: {}", error);
        }
        Err(error)
    }
}
