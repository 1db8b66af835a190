use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::capture::domain::still_image::StillImage;
use crate::recognition::domain::face_enroller::FaceEnroller;
use crate::recognition::domain::face_recognizer::FaceRecognizer;
use crate::recognition::domain::recognition_result::{EnrollmentResult, RecognitionResult};
use crate::shared::constants::{ENROLL_PATH, IMAGE_FIELD, RECOGNIZE_PATH, ROLL_NO_FIELD};

#[derive(Error, Debug)]
enum RequestError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Talks to the attendance server over multipart form POSTs.
///
/// One request per call. No retries; timeouts are whatever the underlying
/// `reqwest` client enforces.
pub struct HttpRecognitionClient {
    client: Client,
    base_url: String,
}

impl HttpRecognitionClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T, RequestError> {
        let url = self.endpoint(path);
        log::debug!("POST {url}");
        let response = self.client.post(&url).multipart(form).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status(status));
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl FaceRecognizer for HttpRecognitionClient {
    fn recognize(&self, image: &StillImage) -> RecognitionResult {
        let form = multipart::Form::new().text(IMAGE_FIELD, image.to_data_url());
        match self.post::<RecognitionResult>(RECOGNIZE_PATH, form) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Recognition error: {e}");
                RecognitionResult::failure(e)
            }
        }
    }
}

impl FaceEnroller for HttpRecognitionClient {
    fn enroll(&self, roll_no: &str, image: &StillImage) -> EnrollmentResult {
        let form = multipart::Form::new()
            .text(ROLL_NO_FIELD, roll_no.to_string())
            .text(IMAGE_FIELD, image.to_data_url());
        match self.post::<EnrollmentResult>(ENROLL_PATH, form) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Enrollment error for {roll_no}: {e}");
                EnrollmentResult::failure(e)
            }
        }
    }
}
