//! Domain operations over the connector primitives.
//!
//! Each resource type borrows a [`ResManConnector`](crate::connector::ResManConnector)
//! and maps one group of endpoints to typed requests and results. Obtain
//! them from [`ResManClient`](crate::ResManClient) or construct them directly.

pub mod accounts;
pub mod dates;
pub mod employees;
pub mod notes;
pub mod pick_lists;
pub mod properties;
pub mod residents;
pub mod work_orders;

#[cfg(test)]
mod work_orders_tests;

pub use accounts::{AccountInfo, Accounts, SecurityGroup, SecurityGroupUser};
pub use employees::{Employee, EmployeeFilter, EmployeeStatus, Employees};
pub use notes::{NewNote, NoteResponse, Notes};
pub use pick_lists::{PickListItem, PickListName, PickLists};
pub use properties::{
    Amenity, AmenityUnit, Building, CurrentPeriod, ManagementTeamMember, Properties, Property,
    PropertyGroup, PropertyType,
};
pub use residents::{
    ResidencyStatus, Resident, ResidentLease, ResidentLeaseStatus, ResidentQuery, Residents,
};
pub use work_orders::{
    WorkOrder, WorkOrderAppointment, WorkOrderCategory, WorkOrderDocument, WorkOrderFields,
    WorkOrderLocation, WorkOrderLocationOption, WorkOrderPriority, WorkOrderQuery, WorkOrderReceipt,
    WorkOrderStatus, WorkOrderUpdate, WorkOrders,
};
