//! Resident data for credit reporting.

use serde::{Deserialize, Serialize};

use crate::connector::{
    ApiResponse, HttpClient, RequestOptions, ResManConnector, extract_list, normalize,
};
use crate::time::Sleeper;

/// Lease standing of a resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidentLeaseStatus {
    Current,
    #[serde(rename = "Under Eviction")]
    UnderEviction,
    #[serde(rename = "Notice to Vacate")]
    NoticeToVacate,
    #[serde(rename = "Month to Month")]
    MonthToMonth,
}

/// Residency standing of a resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidencyStatus {
    Current,
    #[serde(rename = "Under Eviction")]
    UnderEviction,
    #[serde(rename = "Notice to Vacate")]
    NoticeToVacate,
    #[serde(rename = "Month to Month")]
    MonthToMonth,
}

/// A lease in a resident's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentLease {
    pub lease_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

/// A person on a lease, as reported for credit reporting.
///
/// Dates are kept as the API's ISO 8601 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub billing_account_id: String,
    pub person_id: String,
    pub lease_id: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_phone: Option<String>,
    #[serde(default)]
    pub home_phone: Option<String>,
    #[serde(default)]
    pub work_phone: Option<String>,
    #[serde(default)]
    pub household_status: Option<String>,
    pub is_head_of_household: bool,
    pub is_dependent: bool,
    pub is_lease_signer: bool,
    pub is_main_contact: bool,
    pub is_excluded_from_occupancy: bool,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub social_security_number: Option<String>,
    #[serde(default)]
    pub lease_start_date: Option<String>,
    #[serde(default)]
    pub lease_end_date: Option<String>,
    #[serde(default)]
    pub move_in_date: Option<String>,
    #[serde(default)]
    pub move_out_date: Option<String>,
    pub lease_status: ResidentLeaseStatus,
    pub residency_status: ResidencyStatus,
    pub rent: f64,
    #[serde(default)]
    pub leases: Vec<ResidentLease>,
}

/// Filter for [`Residents::get_residents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentQuery {
    pub property_id: String,
    pub person_id: Option<String>,
    pub include_lease_history: bool,
}

impl ResidentQuery {
    /// All residents of a property, without lease history.
    #[must_use]
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            person_id: None,
            include_lease_history: false,
        }
    }

    /// Restricts the result to one person.
    #[must_use]
    pub fn with_person_id(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    /// Includes each resident's lease history.
    #[must_use]
    pub const fn with_lease_history(mut self, include: bool) -> Self {
        self.include_lease_history = include;
        self
    }
}

/// `/CreditReporting/Residents` endpoint.
#[derive(Debug)]
pub struct Residents<'a, H, S> {
    connector: &'a ResManConnector<H, S>,
}

impl<'a, H, S> Residents<'a, H, S> {
    #[must_use]
    pub const fn new(connector: &'a ResManConnector<H, S>) -> Self {
        Self { connector }
    }
}

impl<H: HttpClient, S: Sleeper> Residents<'_, H, S> {
    /// Lists residents of a property.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or
    /// `people` is malformed.
    pub async fn get_residents(&self, query: &ResidentQuery) -> ApiResponse<Vec<Resident>> {
        let options = RequestOptions::new()
            .param("propertyId", query.property_id.as_str())
            .param_opt("personId", query.person_id.as_deref())
            .param("includeLeaseHistory", query.include_lease_history);
        let payload = self
            .connector
            .get("/CreditReporting/Residents", options)
            .await?;
        normalize(extract_list(payload, "people"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockClient, connector, query_of};
    use serde_json::json;
    use std::sync::Arc;

    fn resident() -> serde_json::Value {
        json!({
            "billingAccountId": "ba1",
            "personId": "per1",
            "leaseId": "l1",
            "firstName": "Ann",
            "lastName": "Lee",
            "isHeadOfHousehold": true,
            "isDependent": false,
            "isLeaseSigner": true,
            "isMainContact": true,
            "isExcludedFromOccupancy": false,
            "leaseStatus": "Notice to Vacate",
            "residencyStatus": "Current",
            "rent": 1250.5,
            "leases": [{
                "leaseId": "l0",
                "startDate": "2022-01-01",
                "endDate": "2022-12-31",
                "status": "Former"
            }]
        })
    }

    #[tokio::test]
    async fn get_residents_sends_filter_and_reads_people() {
        let mock = Arc::new(MockClient::ok(&json!({ "people": [resident()] })));
        let connector = connector(&mock);
        let query = ResidentQuery::new("p1")
            .with_person_id("per1")
            .with_lease_history(true);

        let people = Residents::new(&connector)
            .get_residents(&query)
            .await
            .unwrap();

        assert_eq!(people[0].lease_status, ResidentLeaseStatus::NoticeToVacate);
        assert_eq!(people[0].residency_status, ResidencyStatus::Current);
        assert_eq!(people[0].leases.len(), 1);
        let req = mock.last_request();
        assert_eq!(req.url.path(), "/CreditReporting/Residents");
        assert_eq!(
            query_of(&req),
            vec![
                ("propertyId".to_string(), "p1".to_string()),
                ("personId".to_string(), "per1".to_string()),
                ("includeLeaseHistory".to_string(), "true".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn absent_person_is_not_sent() {
        let mock = Arc::new(MockClient::ok(&json!({ "people": [] })));
        let connector = connector(&mock);

        Residents::new(&connector)
            .get_residents(&ResidentQuery::new("p1"))
            .await
            .unwrap();

        let names: Vec<String> = query_of(&mock.last_request())
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["propertyId", "includeLeaseHistory"]);
    }
}
