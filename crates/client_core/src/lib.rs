use async_trait::async_trait;
use reqwest::{multipart::Form, Client};
use shared::protocol::{
    PredictionForm, PredictionOutcome, SaveOutcome, PREDICT_PATH, SAVE_FLAG_FIELD,
};
use tracing::{debug, warn};
use url::Url;

pub mod error;

pub use error::ClientError;

/// The remote service behind `/predict`.
///
/// Application-level failures (`success: false`) come back as `Ok` outcomes;
/// `Err` is reserved for transport and decode failures.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, form: &PredictionForm) -> Result<PredictionOutcome, ClientError>;
    async fn save(&self, form: &PredictionForm) -> Result<SaveOutcome, ClientError>;
}

pub struct HttpPredictionClient {
    http: Client,
    endpoint: Url,
}

impl HttpPredictionClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(server_url)
            .and_then(|base| base.join(PREDICT_PATH))
            .map_err(|source| ClientError::InvalidServerUrl {
                url: server_url.to_string(),
                source,
            })?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post_form(&self, form: Form) -> Result<String, ClientError> {
        let body = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, form: &PredictionForm) -> Result<PredictionOutcome, ClientError> {
        debug!(
            endpoint = %self.endpoint,
            compound = %form.compound,
            reaction_type = %form.reaction_type,
            catalyst = %form.catalyst,
            "posting prediction request"
        );
        let body = self.post_form(multipart_form(form)).await.inspect_err(|err| {
            warn!(endpoint = %self.endpoint, "prediction request failed: {err}");
        })?;
        PredictionOutcome::from_json(&body).map_err(|err| {
            warn!(endpoint = %self.endpoint, "undecodable prediction response: {err}");
            ClientError::from(err)
        })
    }

    async fn save(&self, form: &PredictionForm) -> Result<SaveOutcome, ClientError> {
        debug!(
            endpoint = %self.endpoint,
            compound = %form.compound,
            "posting save request"
        );
        let request = multipart_form(form).text(SAVE_FLAG_FIELD, "true");
        let body = self.post_form(request).await.inspect_err(|err| {
            warn!(endpoint = %self.endpoint, "save request failed: {err}");
        })?;
        SaveOutcome::from_json(&body).map_err(|err| {
            warn!(endpoint = %self.endpoint, "undecodable save response: {err}");
            ClientError::from(err)
        })
    }
}

fn multipart_form(form: &PredictionForm) -> Form {
    form.fields()
        .into_iter()
        .fold(Form::new(), |multipart, (name, value)| {
            multipart.text(name, value.to_string())
        })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
