//! Common repository traits
//!
//! This module defines generic interfaces for operations on vendor resources.
//! Every resource lives on the vendor side, so the error type is always [`VendorError`].

use super::client::VendorError;

/// Trait for creating new resources on the vendor
///
/// # Type Parameters
/// * `Entity` - Type of the returned resource (with SID assigned by the vendor)
/// * `CreateDTO` - DTO for creation (without SID, will be generated by the vendor)
pub trait Create<Entity, CreateDTO> {
    /// Creates a new resource
    ///
    /// # Arguments
    /// * `data` - DTO containing the creation parameters
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created resource with its SID
    /// * `Err(VendorError)` - Error returned by the vendor or transport failure
    async fn create(&self, data: &CreateDTO) -> Result<Entity, VendorError>;
}

/// Trait for reading a single resource by SID (or by unique name where the vendor allows it)
///
/// # Type Parameters
/// * `Entity` - Type of the resource to read
/// * `Id` - Type of the identifier (a SID string for every vendor resource)
pub trait Read<Entity, Id: ?Sized> {
    /// Reads a resource by its identifier
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Resource found
    /// * `Ok(None)` - The vendor answered with error code 20404
    /// * `Err(VendorError)` - Any other error
    async fn read(&self, id: &Id) -> Result<Option<Entity>, VendorError>;
}

/// Trait for updating existing resources
///
/// # Type Parameters
/// * `Entity` - Type of the updated resource
/// * `UpdateDTO` - DTO with the fields to update
/// * `Id` - Type of the identifier
pub trait Update<Entity, UpdateDTO, Id: ?Sized> {
    /// Updates an existing resource
    ///
    /// # Returns
    /// * `Ok(Entity)` - Updated resource
    /// * `Err(VendorError)` - Error during update (e.g. resource not found)
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, VendorError>;
}

/// Trait for deleting resources
///
/// # Type Parameters
/// * `Id` - Type of the identifier
pub trait Delete<Id: ?Sized> {
    /// Deletes a resource
    ///
    /// # Returns
    /// * `Ok(())` - Deletion successful
    /// * `Err(VendorError)` - Error during deletion
    async fn delete(&self, id: &Id) -> Result<(), VendorError>;
}
