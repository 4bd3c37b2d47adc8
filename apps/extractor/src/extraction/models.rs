#![allow(dead_code)]

//! Typed view of the extraction schema the model is asked to fill.
//!
//! Only used to report whether a parsed result has the expected shape. The response body is
//! always the model's own JSON, and field values are never checked against the allowed lists.

use serde::Deserialize;
use serde_json::Value;

/// Top-level object: one property-details record plus amenity and facility lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingExtraction {
    #[serde(rename = "propertyDetails")]
    pub property_details: Vec<PropertyDetails>,
    /// On-site features (lift, power backup, ...).
    pub propertyamenitiesdetails: Vec<Value>,
    /// Nearby conveniences (metro, schools, ...).
    pub propertyfacilitydetails: Vec<Value>,
}

/// A single property record. Field names mirror the JSON keys exactly.
///
/// Loosely-typed fields (`zipcode`, `washroom`, contact numbers, ...) stay as raw JSON since
/// the model may return them as strings or numbers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertyDetails {
    pub propertytype: Option<String>,
    pub listingtype: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub deposit: Option<f64>,
    pub maintenance: Option<f64>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub carpetarea: Option<f64>,
    pub builduparea: Option<f64>,
    pub spaceunit: Option<String>,
    pub availability: Option<String>,
    pub furnishingstatus: Option<String>,
    pub addressline1: Option<String>,
    pub addressline2: Option<String>,
    pub statecode: Option<String>,
    pub zipcode: Option<Value>,
    pub roomtype: Option<Value>,
    pub views: Option<Value>,
    pub floor: Option<Value>,
    pub ageofproperty: Option<Value>,
    pub washroom: Option<Value>,
    pub parkingavailable: Option<Value>,
    pub reracertified: bool,
    pub issold: bool,
    pub direction: Option<String>,
    pub contactnumber: Option<Value>,
    pub username: Option<String>,
    pub reranumber: Option<Value>,
    pub name: Option<String>,
    pub number: Option<Value>,
    pub negotiable: Option<Value>,
}

impl ListingExtraction {
    /// Reads the typed view out of a parsed model response without consuming it.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}
