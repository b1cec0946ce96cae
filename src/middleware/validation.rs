use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{to_api_error, ApiError};

/// `Json<T>` + `validator`. Любая ошибка тела запроса - 400.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiError>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| to_api_error(StatusCode::BAD_REQUEST, &e.body_text()))?;

        value
            .validate()
            .map_err(|e| to_api_error(StatusCode::BAD_REQUEST, &e.to_string()))?;

        Ok(ValidatedJson(value))
    }
}
