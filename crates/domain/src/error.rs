//! Common error types used across the workspace.
//!
//! Each layer defines typed errors and converts into [`ClientError`] via
//! `#[from]`.

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("controller request failed")]
    Controller(#[from] ControllerError),

    #[error("rendering failed")]
    Render(#[from] RenderError),
}

/// Input rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
}

/// A request to the controller did not produce a usable response.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The request never completed (connection refused, DNS, aborted, …).
    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: BoxError,
    },

    /// The controller answered with a non-2xx status.
    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The body was not the expected JSON shape.
    #[error("failed to decode {endpoint} response")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ControllerError {
    /// The endpoint path the failed request targeted.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}

/// The front end could not materialize a rendered fragment.
#[derive(Debug, thiserror::Error)]
#[error("failed to mount {target}: {reason}")]
pub struct RenderError {
    pub target: &'static str,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error_with_endpoint() {
        let err = ControllerError::Status {
            endpoint: "/api/water",
            status: 400,
        };
        assert_eq!(err.to_string(), "/api/water responded with HTTP 400");
        assert_eq!(err.endpoint(), "/api/water");
    }

    #[test]
    fn should_display_transport_error() {
        let err = ControllerError::Transport {
            endpoint: "/api/data",
            source: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "request to /api/data failed");
    }

    #[test]
    fn should_convert_validation_error_into_client_error() {
        let err: ClientError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_display_render_error() {
        let err = RenderError {
            target: "plant-list",
            reason: "detached".to_string(),
        };
        assert_eq!(err.to_string(), "failed to mount plant-list: detached");
    }
}
