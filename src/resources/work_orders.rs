//! Maintenance work orders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::connector::{
    ApiResponse, HttpClient, RequestOptions, ResManConnector, ResManError, decode, extract_list,
    failure, normalize,
};
use crate::time::{Clock, Sleeper};

use super::dates::{
    format_date, format_http_date, now_utc, validate_modified_since, validate_start_and_end_date,
};

/// Progress of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    Submitted,
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Scheduled,
    Cancelled,
    Closed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl WorkOrderStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Scheduled => "Scheduled",
            Self::Cancelled => "Cancelled",
            Self::Closed => "Closed",
            Self::OnHold => "On Hold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderPriority {
    Low,
    Medium,
    High,
}

/// Whether maintenance may enter without the resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderAppointment {
    #[serde(rename = "Not Required")]
    NotRequired,
    Call,
    #[serde(rename = "Permission Given")]
    PermissionGiven,
    #[serde(rename = "Permission Not Given")]
    PermissionNotGiven,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderLocation {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderDocument {
    pub document_id: String,
    pub name: String,
}

/// A work order as returned by `GET /WorkOrders`.
///
/// Dates are kept as the API's ISO 8601 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub work_order_id: String,
    pub property_id: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub assigned_to_person_id: Option<String>,
    pub number: u64,
    #[serde(default)]
    pub reported_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub reported_by: Option<String>,
    #[serde(default)]
    pub reported_by_person_id: Option<String>,
    pub description: String,
    pub category: String,
    pub category_id: String,
    pub is_make_ready: bool,
    #[serde(default)]
    pub location: Option<WorkOrderLocation>,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub pets: Vec<String>,
    pub appointment: WorkOrderAppointment,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: WorkOrderStatus,
    pub priority: WorkOrderPriority,
    pub cost: f64,
    #[serde(default)]
    pub completed_by: Option<String>,
    #[serde(default)]
    pub completed_by_person_id: Option<String>,
    #[serde(default)]
    pub completed_notes: Option<String>,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub documents: Vec<WorkOrderDocument>,
    pub last_modified: String,
}

/// Fields of a new or updated work order.
///
/// Unset fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderFields {
    pub property_id: String,
    pub reported_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub reported_by_person_id: Option<String>,
    pub assigned_to_person_id: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub areas: Option<Vec<String>>,
    pub pets: Option<Vec<String>>,
    pub location: Option<WorkOrderLocation>,
    pub appointment: Option<WorkOrderAppointment>,
    pub notes: Option<String>,
    pub priority: Option<WorkOrderPriority>,
    pub cost: Option<f64>,
    pub started_date: Option<DateTime<Utc>>,
    pub status: Option<WorkOrderStatus>,
    pub completed_by_person_id: Option<String>,
    pub completed_notes: Option<String>,
    pub completed_date: Option<DateTime<Utc>>,
}

impl WorkOrderFields {
    /// Fields for a work order at `property_id`, everything else unset.
    #[must_use]
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            ..Self::default()
        }
    }
}

/// Changes to an existing work order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderUpdate {
    pub work_order_id: String,
    #[serde(flatten)]
    pub fields: WorkOrderFields,
}

/// Identity of a created or updated work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderReceipt {
    pub work_order_id: String,
    pub number: u64,
    pub property_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderCategory {
    pub category_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderLocationOption {
    pub location_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
}

/// Filter for [`WorkOrders::get_work_orders`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkOrderQuery {
    pub property_id: String,
    /// Only work orders changed since this instant; at most a year back
    /// and no later than the start of today (UTC).
    pub modified_since: Option<DateTime<Utc>>,
    pub assigned_to_person_id: Option<String>,
    /// Range start; requires `end_date`.
    pub start_date: Option<NaiveDate>,
    /// Range end; requires `start_date`.
    pub end_date: Option<NaiveDate>,
    pub statuses: Vec<WorkOrderStatus>,
    pub work_order_number: Option<String>,
}

impl WorkOrderQuery {
    #[must_use]
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn modified_since(mut self, since: DateTime<Utc>) -> Self {
        self.modified_since = Some(since);
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, person_id: impl Into<String>) -> Self {
        self.assigned_to_person_id = Some(person_id.into());
        self
    }

    #[must_use]
    pub const fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = WorkOrderStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    #[must_use]
    pub fn number(mut self, number: impl ToString) -> Self {
        self.work_order_number = Some(number.to_string());
        self
    }

    fn validate(&self, now: DateTime<Utc>) -> Result<(), ResManError> {
        if let Some(since) = self.modified_since {
            validate_modified_since(since, now)?;
        }
        validate_start_and_end_date(self.start_date, self.end_date, now.date_naive())
    }

    fn to_options(&self) -> RequestOptions {
        let statuses = (!self.statuses.is_empty()).then(|| {
            self.statuses
                .iter()
                .map(|status| status.as_str())
                .collect::<Vec<_>>()
                .join(",")
        });

        RequestOptions::new()
            .param("propertyId", self.property_id.as_str())
            .param_opt("modifiedSince", self.modified_since.map(format_http_date))
            .param_opt("assignedToPersonId", self.assigned_to_person_id.as_deref())
            .param_opt("startDate", self.start_date.map(format_date))
            .param_opt("endDate", self.end_date.map(format_date))
            .param_opt("statuses", statuses)
            .param_opt("workOrderNumber", self.work_order_number.as_deref())
    }
}

/// `/WorkOrders` endpoints.
///
/// Date filters are checked against `clock` before any request is sent.
pub struct WorkOrders<'a, H, S> {
    connector: &'a ResManConnector<H, S>,
    clock: &'a dyn Clock,
}

impl<'a, H, S> WorkOrders<'a, H, S> {
    #[must_use]
    pub const fn new(connector: &'a ResManConnector<H, S>, clock: &'a dyn Clock) -> Self {
        Self { connector, clock }
    }
}

impl<H: HttpClient, S: Sleeper> WorkOrders<'_, H, S> {
    /// Lists work orders of a property.
    ///
    /// Rejects an out-of-range `modified_since` or an incomplete, reversed
    /// or future date range with [`ResManError::InvalidArgument`], without
    /// contacting the API.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError::InvalidArgument`](crate::ResManError::InvalidArgument)
    /// without sending anything when the date filters are out of range;
    /// otherwise any failure of the call.
    pub async fn get_work_orders(&self, query: &WorkOrderQuery) -> ApiResponse<Vec<WorkOrder>> {
        if let Err(e) = query.validate(now_utc(self.clock)) {
            return failure(e);
        }

        let payload = self.connector.get("/WorkOrders", query.to_options()).await?;
        normalize(extract_list(payload, "workOrders"))
    }

    /// Creates a work order (POST `/WorkOrders`).
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the API rejects the
    /// work order or no response arrives.
    pub async fn add_work_order(&self, fields: &WorkOrderFields) -> ApiResponse<WorkOrderReceipt> {
        let payload = self
            .connector
            .post("/WorkOrders", fields, RequestOptions::new())
            .await?;
        normalize(decode(payload))
    }

    /// Updates a work order (PUT `/WorkOrders`).
    ///
    /// # Errors
    ///
    /// As [`add_work_order`](Self::add_work_order).
    pub async fn update_work_order(
        &self,
        update: &WorkOrderUpdate,
    ) -> ApiResponse<WorkOrderReceipt> {
        let payload = self
            .connector
            .put("/WorkOrders", update, RequestOptions::new())
            .await?;
        normalize(decode(payload))
    }

    /// Lists the areas a work order at the property can name.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or the
    /// list is malformed.
    pub async fn get_work_order_areas(&self, property_id: &str) -> ApiResponse<Vec<String>> {
        self.list_for_property("/WorkOrders/Areas", property_id, "areas")
            .await
    }

    /// Lists the work order categories of a property.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or the
    /// list is malformed.
    pub async fn get_work_order_categories(
        &self,
        property_id: &str,
    ) -> ApiResponse<Vec<WorkOrderCategory>> {
        self.list_for_property("/WorkOrders/Categories", property_id, "categories")
            .await
    }

    /// Lists the locations a work order at the property can point at.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or the
    /// list is malformed.
    pub async fn get_work_order_locations(
        &self,
        property_id: &str,
    ) -> ApiResponse<Vec<WorkOrderLocationOption>> {
        self.list_for_property("/WorkOrders/Locations", property_id, "locations")
            .await
    }

    async fn list_for_property<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        property_id: &str,
        field: &str,
    ) -> ApiResponse<Vec<T>> {
        let options = RequestOptions::new().param("propertyId", property_id);
        let payload = self.connector.get(path, options).await?;
        normalize(extract_list(payload, field))
    }
}

impl<H, S> std::fmt::Debug for WorkOrders<'_, H, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkOrders").finish_non_exhaustive()
    }
}
