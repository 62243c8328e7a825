//! Bearer token interceptor for backend calls.

use crate::{ClientError, Result};
use std::fmt;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Adds `authorization: Bearer <token>` to every call when a token is set.
#[derive(Clone, Default)]
pub struct BearerAuth {
    header: Option<MetadataValue<Ascii>>,
}

impl BearerAuth {
    /// Creates the interceptor. `None` or an empty token disables it.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let header = match token.map(str::trim) {
            None | Some("") => None,
            Some(token) => Some(
                format!("Bearer {token}")
                    .parse::<MetadataValue<Ascii>>()
                    .map_err(|_| {
                        ClientError::InvalidConfig(
                            "token contains characters not allowed in a header".to_string(),
                        )
                    })?,
            ),
        };
        Ok(Self { header })
    }

    /// Returns true if calls will carry a token.
    pub fn is_enabled(&self) -> bool {
        self.header.is_some()
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Interceptor for BearerAuth {
    fn call(&mut self, mut request: Request<()>) -> std::result::Result<Request<()>, Status> {
        if let Some(header) = &self.header {
            request
                .metadata_mut()
                .insert("authorization", header.clone());
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_authorization_header() {
        let mut auth = BearerAuth::new(Some("s3cret")).unwrap();
        let request = auth.call(Request::new(())).unwrap();
        let header = request.metadata().get("authorization").unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer s3cret");
    }

    #[test]
    fn test_disabled_without_token() {
        for token in [None, Some(""), Some("   ")] {
            let mut auth = BearerAuth::new(token).unwrap();
            assert!(!auth.is_enabled());
            let request = auth.call(Request::new(())).unwrap();
            assert!(request.metadata().get("authorization").is_none());
        }
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let err = BearerAuth::new(Some("abc\ndef")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let auth = BearerAuth::new(Some("s3cret")).unwrap();
        let debug = format!("{auth:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("enabled: true"));
    }
}
