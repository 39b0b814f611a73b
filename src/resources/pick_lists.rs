//! Pick lists: the account's configurable enumerations.

use serde::{Deserialize, Serialize};

use crate::connector::{
    ApiResponse, HttpClient, RequestOptions, ResManConnector, extract_list, normalize,
};
use crate::time::Sleeper;

/// Name of a pick list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickListName {
    Area,
    #[serde(rename = "IDNumberType")]
    IdNumberType,
    Industry,
    Language,
    LostProspectReason,
    OtherIncomeType,
    ReasonForLeaving,
    WorkOrderCancellationReasons,
}

impl PickListName {
    /// Wire name of the pick list.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Area => "Area",
            Self::IdNumberType => "IDNumberType",
            Self::Industry => "Industry",
            Self::Language => "Language",
            Self::LostProspectReason => "LostProspectReason",
            Self::OtherIncomeType => "OtherIncomeType",
            Self::ReasonForLeaving => "ReasonForLeaving",
            Self::WorkOrderCancellationReasons => "WorkOrderCancellationReasons",
        }
    }
}

/// One entry of a pick list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickListItem {
    pub picklist_item_id: String,
    pub name: String,
}

/// `/PickLists` endpoint.
#[derive(Debug)]
pub struct PickLists<'a, H, S> {
    connector: &'a ResManConnector<H, S>,
}

impl<'a, H, S> PickLists<'a, H, S> {
    #[must_use]
    pub const fn new(connector: &'a ResManConnector<H, S>) -> Self {
        Self { connector }
    }
}

impl<H: HttpClient, S: Sleeper> PickLists<'_, H, S> {
    /// Returns the items of pick list `name` (GET `/PickLists`).
    ///
    /// # Errors
    ///
    /// Returns [`ResManError`](crate::ResManError) if the call fails or
    /// `pickList` is malformed.
    pub async fn get_pick_lists(&self, name: PickListName) -> ApiResponse<Vec<PickListItem>> {
        let options = RequestOptions::new().param("name", name.as_str());
        let payload = self.connector.get("/PickLists", options).await?;
        normalize(extract_list(payload, "pickList"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockClient, connector, query_of};
    use serde_json::json;
    use std::sync::Arc;

    const ALL: [PickListName; 8] = [
        PickListName::Area,
        PickListName::IdNumberType,
        PickListName::Industry,
        PickListName::Language,
        PickListName::LostProspectReason,
        PickListName::OtherIncomeType,
        PickListName::ReasonForLeaving,
        PickListName::WorkOrderCancellationReasons,
    ];

    #[test]
    fn wire_name_matches_serde_name() {
        for name in ALL {
            assert_eq!(serde_json::to_value(name).unwrap(), json!(name.as_str()));
        }
    }

    #[tokio::test]
    async fn get_pick_lists_sends_name_and_reads_items() {
        let mock = Arc::new(MockClient::ok(&json!({
            "pickList": [{ "picklistItemId": "1", "name": "Kitchen" }]
        })));
        let connector = connector(&mock);

        let items = PickLists::new(&connector)
            .get_pick_lists(PickListName::IdNumberType)
            .await
            .unwrap();

        assert_eq!(items[0].name, "Kitchen");
        assert_eq!(
            query_of(&mock.last_request()),
            vec![("name".to_string(), "IDNumberType".to_string())]
        );
    }

    #[tokio::test]
    async fn missing_list_is_empty() {
        let mock = Arc::new(MockClient::ok(&json!({})));
        let connector = connector(&mock);

        let items = PickLists::new(&connector)
            .get_pick_lists(PickListName::Area)
            .await
            .unwrap();

        assert!(items.is_empty());
    }
}
