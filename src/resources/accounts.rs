//! Account lookup and security groups.

use serde::{Deserialize, Serialize};

use crate::connector::{
    ApiResponse, HttpClient, RequestOptions, ResManConnector, decode, extract_list, normalize,
};
use crate::time::Sleeper;

/// Account resolved from a ResMan subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub account_id: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupUser {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroup {
    pub security_group_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default)]
    pub users: Vec<SecurityGroupUser>,
}

/// `/Account` endpoints.
#[derive(Debug)]
pub struct Accounts<'a, H, S> {
    connector: &'a ResManConnector<H, S>,
}

impl<'a, H, S> Accounts<'a, H, S> {
    #[must_use]
    pub const fn new(connector: &'a ResManConnector<H, S>) -> Self {
        Self { connector }
    }
}

impl<H: HttpClient, S: Sleeper> Accounts<'_, H, S> {
    /// Resolves the account behind `subdomain` (GET `/Account/AccountId`).
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or the
    /// body is not an account record.
    pub async fn get_account_id(&self, subdomain: &str) -> ApiResponse<AccountInfo> {
        let options = RequestOptions::new().param("subdomain", subdomain);
        let payload = self.connector.get("/Account/AccountId", options).await?;
        normalize(decode(payload))
    }

    /// Lists the account's security groups (GET `/Account/SecurityGroups`).
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or
    /// `groups` is malformed.
    pub async fn get_security_groups(&self) -> ApiResponse<Vec<SecurityGroup>> {
        let payload = self
            .connector
            .get("/Account/SecurityGroups", RequestOptions::new())
            .await?;
        normalize(extract_list(payload, "groups"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockClient, connector, query_of};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn get_account_id_sends_subdomain_and_reads_whole_body() {
        let mock = Arc::new(MockClient::ok(
            &json!({ "accountId": "400", "companyName": "Acme Living" }),
        ));
        let connector = connector(&mock);

        let info = Accounts::new(&connector)
            .get_account_id("acme")
            .await
            .unwrap();

        assert_eq!(info.account_id, "400");
        assert_eq!(info.company_name.as_deref(), Some("Acme Living"));
        let req = mock.last_request();
        assert_eq!(req.url.path(), "/Account/AccountId");
        assert_eq!(
            query_of(&req),
            vec![("subdomain".to_string(), "acme".to_string())]
        );
    }

    #[tokio::test]
    async fn get_security_groups_reads_groups_field() {
        let mock = Arc::new(MockClient::ok(&json!({
            "groups": [{
                "securityGroupId": "g1",
                "name": "Managers",
                "type": "Corporate",
                "users": [{
                    "userId": "u1",
                    "username": "jdoe",
                    "firstName": "J",
                    "lastName": "Doe"
                }]
            }]
        })));
        let connector = connector(&mock);

        let groups = Accounts::new(&connector)
            .get_security_groups()
            .await
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_type, "Corporate");
        assert_eq!(groups[0].users[0].username, "jdoe");
        assert!(groups[0].description.is_none());
    }

    #[tokio::test]
    async fn http_failure_is_returned_as_error() {
        let mock = Arc::new(MockClient::json(401, &json!({ "message": "Unauthorized" })));
        let connector = connector(&mock);

        let error = Accounts::new(&connector)
            .get_security_groups()
            .await
            .unwrap_err();

        assert_eq!(error.status(), Some(http::StatusCode::UNAUTHORIZED));
    }
}
