use tonic::Status;

use super::status_from_auth_error;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::validation;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<AS: AuthServicePort>(
    service: &AS,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    validation::credentials(&request.email, &request.password)?;
    validation::positive_id("app_id", request.app_id)?;

    let token = service
        .login(&request.email, &request.password, request.app_id)
        .await
        .map_err(status_from_auth_error)?;

    Ok(LoginResponse { token })
}
