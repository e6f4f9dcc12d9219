use tonic::Status;

use super::status_from_auth_error;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::validation;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<AS: AuthServicePort>(
    service: &AS,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, Status> {
    validation::positive_id("user_id", request.user_id)?;

    let is_admin = service
        .is_admin(request.user_id)
        .await
        .map_err(status_from_auth_error)?;

    Ok(IsAdminResponse { is_admin })
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;
    use tonic::Code;

    use super::*;
    use crate::domain::identity::errors::AuthError;
    use crate::domain::identity::errors::Operation;
    use crate::inbound::grpc::handlers::tests::MockTestAuthService;

    #[tokio::test]
    async fn test_is_admin_returns_flag() {
        let mut service = MockTestAuthService::new();
        service
            .expect_is_admin()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(true));

        let response = is_admin(&service, IsAdminRequest { user_id: 7 })
            .await
            .expect("IsAdmin failed");
        assert!(response.is_admin);
    }

    #[tokio::test]
    async fn test_is_admin_unknown_user_is_not_found() {
        let mut service = MockTestAuthService::new();
        service.expect_is_admin().times(1).returning(|_| {
            Err(AuthError::UserNotFound {
                operation: Operation::IsAdmin,
            })
        });

        let status = is_admin(&service, IsAdminRequest { user_id: 42 })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_is_admin_rejects_non_positive_id() {
        let mut service = MockTestAuthService::new();
        service.expect_is_admin().times(0);

        let status = is_admin(&service, IsAdminRequest { user_id: 0 })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }
}
