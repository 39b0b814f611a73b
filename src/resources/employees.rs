//! Employees of the account.

use serde::{Deserialize, Serialize};

use crate::connector::{
    ApiResponse, HttpClient, RequestOptions, ResManConnector, extract_list, normalize,
};
use crate::time::Sleeper;

/// Employment standing, derived from the termination date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub person_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub security_group: String,
    pub is_leasing: bool,
    pub is_maintenance: bool,
    pub is_corporate: bool,
    #[serde(default)]
    pub termination_date: Option<String>,
    #[serde(default)]
    pub property_ids: Vec<String>,
}

impl Employee {
    #[must_use]
    pub const fn status(&self) -> EmployeeStatus {
        if self.termination_date.is_some() {
            EmployeeStatus::Terminated
        } else {
            EmployeeStatus::Active
        }
    }
}

/// Client-side filter for [`Employees::get_employees`].
///
/// The endpoint itself takes no parameters; both criteria are applied to
/// the returned list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub property_id: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    #[must_use]
    pub fn with_property_id(mut self, property_id: impl Into<String>) -> Self {
        self.property_id = Some(property_id.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn matches(&self, employee: &Employee) -> bool {
        let property_ok = self
            .property_id
            .as_ref()
            .is_none_or(|id| employee.property_ids.contains(id));
        let status_ok = self.status.is_none_or(|status| employee.status() == status);
        property_ok && status_ok
    }
}

/// `/Employees` endpoint.
#[derive(Debug)]
pub struct Employees<'a, H, S> {
    connector: &'a ResManConnector<H, S>,
}

impl<'a, H, S> Employees<'a, H, S> {
    #[must_use]
    pub const fn new(connector: &'a ResManConnector<H, S>) -> Self {
        Self { connector }
    }
}

impl<H: HttpClient, S: Sleeper> Employees<'_, H, S> {
    /// Lists employees matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or
    /// `employees` is malformed.
    pub async fn get_employees(&self, filter: &EmployeeFilter) -> ApiResponse<Vec<Employee>> {
        let payload = self
            .connector
            .get("/Employees", RequestOptions::new())
            .await?;
        let mut employees: Vec<Employee> = normalize(extract_list(payload, "employees"))?;
        employees.retain(|employee| filter.matches(employee));
        Ok(employees)
    }
}
