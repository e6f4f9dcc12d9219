use tonic::Status;

use super::status_from_auth_error;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::validation;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<AS: AuthServicePort>(
    service: &AS,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    validation::credentials(&request.email, &request.password)?;

    let user_id = service
        .register(&request.email, &request.password)
        .await
        .map_err(status_from_auth_error)?;

    Ok(RegisterResponse { user_id })
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;
    use tonic::Code;

    use super::*;
    use crate::domain::identity::errors::AuthError;
    use crate::domain::identity::errors::Operation;
    use crate::inbound::grpc::handlers::tests::MockTestAuthService;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut service = MockTestAuthService::new();
        service
            .expect_register()
            .with(eq("a@x.com"), eq("secret123"))
            .times(1)
            .returning(|_, _| Ok(1));

        let response = register(&service, request("a@x.com", "secret123"))
            .await
            .expect("Register failed");
        assert_eq!(response.user_id, 1);
    }

    #[tokio::test]
    async fn test_register_already_exists() {
        let mut service = MockTestAuthService::new();
        service.expect_register().times(1).returning(|_, _| {
            Err(AuthError::UserAlreadyExists {
                operation: Operation::Register,
            })
        });

        let status = register(&service, request("a@x.com", "other"))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::AlreadyExists);
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields() {
        let mut service = MockTestAuthService::new();
        service.expect_register().times(0);

        let status = register(&service, request("", "secret123"))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);

        let status = register(&service, request("a@x.com", ""))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }
}
