//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::ProductNotFound | Self::FavoriteProductNotFound => {
                StatusCode::NOT_FOUND
            }

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidCredentials | Self::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }

            // 502 Bad Gateway (an upstream collaborator failed or refused)
            Self::ProductsFetchFailed
            | Self::CategoriesFetchFailed
            | Self::CatalogMalformed
            | Self::FavoriteReadFailed
            | Self::FavoriteUpdateFailed
            | Self::SyncRejected
            | Self::AuthProviderError => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::CatalogUnreachable | Self::SyncFailed => StatusCode::SERVICE_UNAVAILABLE,

            // 504 Gateway Timeout
            Self::CatalogTimeout => StatusCode::GATEWAY_TIMEOUT,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::ConfigMissing
            | Self::ConfigInvalid
            | Self::SessionStorageError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed | Self::PrintQuantityInvalid => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(
            ErrorCode::FavoriteProductNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::SyncRejected.http_status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ErrorCode::CatalogTimeout.http_status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ErrorCode::ConfigMissing.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::PrintQuantityInvalid.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
