//! Account and routing handlers.
//!
//! Implements `b2_authorize_account`, `b2_get_upload_url` and
//! `b2_get_upload_part_url`.

use ruststack_b2_model::B2Request;
use ruststack_b2_model::input::{AuthorizeAccountInput, GetUploadPartUrlInput, GetUploadUrlInput};
use ruststack_b2_model::output::{
    AuthorizeAccountOutput, GetUploadPartUrlOutput, GetUploadUrlOutput,
};
use tracing::debug;

use crate::error::{B2ServiceError, B2ServiceResult};
use crate::provider::RustStackB2;
use crate::utils::parse_basic_auth;

/// Path of the whole-file upload endpoint, relative to an upload host.
const UPLOAD_FILE_PATH: &str = "/b2api/v1/b2_upload_file";

/// Path of the part upload endpoint, relative to an upload host.
const UPLOAD_PART_PATH: &str = "/b2api/v1/b2_upload_part";

impl RustStackB2 {
    /// Exchange `Authorization: Basic base64(account:key)` for an auth token.
    pub async fn handle_authorize_account(
        &self,
        req: B2Request<AuthorizeAccountInput>,
    ) -> B2ServiceResult<AuthorizeAccountOutput> {
        let (account_id, key) = parse_basic_auth(req.authorization())?;

        let authorization_token = self.accounts.authorize(&account_id, &key).await?;
        let sizes = self.accounts.sizes(&account_id);

        debug!(account_id = %account_id, "authorize_account completed");

        Ok(AuthorizeAccountOutput {
            api_url: self.accounts.api_root(&account_id),
            download_url: self.accounts.download_root(&account_id),
            account_id,
            authorization_token,
            recommended_part_size: sizes.recommended,
            minimum_part_size: sizes.recommended,
            absolute_minimum_part_size: sizes.absolute_minimum,
        })
    }

    /// Validate the auth token a request carries for calling `api`.
    ///
    /// Handlers do not call this themselves; the gateway in front of the
    /// provider decides which endpoints require a token.
    pub async fn check_authorization<T: Send + Sync>(
        &self,
        req: &B2Request<T>,
        api: &str,
    ) -> B2ServiceResult<()> {
        let token = req
            .authorization()
            .ok_or_else(|| B2ServiceError::Unauthorized {
                message: "Authorization token is required".to_owned(),
            })?;
        self.accounts.check_creds(token, api).await
    }

    /// Resolve the URL a client should upload a whole file to.
    pub async fn handle_get_upload_url(
        &self,
        req: B2Request<GetUploadUrlInput>,
    ) -> B2ServiceResult<GetUploadUrlOutput> {
        let bucket_id = req.input.bucket_id;
        let host = self.accounts.upload_host(&bucket_id).await?;
        let upload_url = format!("{}{UPLOAD_FILE_PATH}/{bucket_id}", host.trim_end_matches('/'));

        debug!(bucket_id = %bucket_id, upload_url = %upload_url, "get_upload_url completed");

        Ok(GetUploadUrlOutput {
            bucket_id,
            upload_url,
        })
    }

    /// Resolve the URL a client should upload parts of a large file to.
    pub async fn handle_get_upload_part_url(
        &self,
        req: B2Request<GetUploadPartUrlInput>,
    ) -> B2ServiceResult<GetUploadPartUrlOutput> {
        let file_id = req.input.file_id;
        let host = self.accounts.upload_part_host(&file_id).await?;
        let upload_url = format!("{}{UPLOAD_PART_PATH}/{file_id}", host.trim_end_matches('/'));

        debug!(file_id = %file_id, upload_url = %upload_url, "get_upload_part_url completed");

        Ok(GetUploadPartUrlOutput {
            file_id,
            upload_url,
        })
    }
}
