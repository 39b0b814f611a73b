//! Properties, property groups, amenities and buildings.

use serde::{Deserialize, Serialize};

use crate::connector::{
    ApiResponse, HttpClient, RequestOptions, ResManConnector, extract_list, normalize,
};
use crate::time::Sleeper;

/// Kind of property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "Multi-Family")]
    MultiFamily,
    Student,
    #[serde(rename = "Mobile Home Lot")]
    MobileHomeLot,
    #[serde(rename = "Single Family")]
    SingleFamily,
    #[serde(rename = "Residential Subdivision")]
    ResidentialSubdivision,
    Commercial,
    Entity,
    #[serde(rename = "Management Company")]
    ManagementCompany,
    Training,
    Condo,
    #[serde(rename = "Tax Credit")]
    TaxCredit,
    #[serde(rename = "HUD")]
    Hud,
    #[serde(rename = "Affordable Combo")]
    AffordableCombo,
    #[serde(rename = "Rural Development")]
    RuralDevelopment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPeriod {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementTeamMember {
    pub person_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// A property of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub property_id: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub current_period: Option<CurrentPeriod>,
    #[serde(default)]
    pub management_team: Vec<ManagementTeamMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroup {
    pub property_group_id: String,
    pub name: String,
    #[serde(default)]
    pub property_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityUnit {
    pub unit_id: String,
    pub unit_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub amenity_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amenity_type_id: String,
    pub amenity_type_name: String,
    pub ils_mapping: String,
    pub available_for_online_marketing: bool,
    #[serde(default)]
    pub units: Vec<AmenityUnit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub building_id: String,
    pub property_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub floors: u32,
    pub total_units: u32,
}

/// `/Properties`, `/Amenities` and `/Buildings` endpoints.
#[derive(Debug)]
pub struct Properties<'a, H, S> {
    connector: &'a ResManConnector<H, S>,
}

impl<'a, H, S> Properties<'a, H, S> {
    #[must_use]
    pub const fn new(connector: &'a ResManConnector<H, S>) -> Self {
        Self { connector }
    }
}

impl<H: HttpClient, S: Sleeper> Properties<'_, H, S> {
    /// Lists every property visible to the account.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or the
    /// envelope is malformed.
    pub async fn get_properties(&self) -> ApiResponse<Vec<Property>> {
        let payload = self
            .connector
            .get("/Properties", RequestOptions::new())
            .await?;
        normalize(extract_list(payload, "properties"))
    }

    /// Lists the property groups defined for the account.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or the
    /// list is malformed.
    pub async fn get_property_groups(&self) -> ApiResponse<Vec<PropertyGroup>> {
        let payload = self
            .connector
            .get("/Properties/Groups", RequestOptions::new())
            .await?;
        normalize(extract_list(payload, "propertyGroups"))
    }

    /// Lists the amenities of a property.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or the
    /// list is malformed.
    pub async fn get_amenities(&self, property_id: &str) -> ApiResponse<Vec<Amenity>> {
        self.list_for_property("/Amenities", property_id, "amenities")
            .await
    }

    /// Lists the buildings of a property.
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or the
    /// list is malformed.
    pub async fn get_buildings(&self, property_id: &str) -> ApiResponse<Vec<Building>> {
        self.list_for_property("/Buildings", property_id, "buildings")
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
