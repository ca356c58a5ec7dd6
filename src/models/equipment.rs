//! Equipment model

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, FromRow, Sqlite,
};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Equipment class (crane type)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum EquipmentClass {
    /// Automated rail-mounted gantry crane
    Armgc,
    /// Quay crane
    Qc,
}

impl EquipmentClass {
    pub const ALL: [EquipmentClass; 2] = [EquipmentClass::Armgc, EquipmentClass::Qc];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentClass::Armgc => "ARMGC",
            EquipmentClass::Qc => "QC",
        }
    }
}

impl std::fmt::Display for EquipmentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ARMGC" => Ok(EquipmentClass::Armgc),
            "QC" => Ok(EquipmentClass::Qc),
            _ => Err(format!("Invalid equipment class: {}", s)),
        }
    }
}

/// Parse an optional class filter coming from the outside world.
pub fn parse_class_filter(raw: Option<&str>) -> AppResult<Option<EquipmentClass>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") | Some("ALL") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(AppError::Validation),
    }
}

// SQLx conversion for EquipmentClass (stored as TEXT in the `type` column)
impl sqlx::Type<Sqlite> for EquipmentClass {
    fn type_info() -> SqliteTypeInfo {
        <String as sqlx::Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as sqlx::Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for EquipmentClass {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let s: &str = Decode::<Sqlite>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> Encode<'q, Sqlite> for EquipmentClass {
    fn encode_by_ref(&self, buf: &mut Vec<SqliteArgumentValue<'q>>) -> IsNull {
        buf.push(SqliteArgumentValue::Text(Cow::Borrowed(self.as_str())));
        IsNull::No
    }
}

/// Equipment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    /// Unit ID (printed as a 3-digit code)
    pub id: i32,
    /// Date of the most recent recorded maintenance (or the seed date)
    pub last_maintenance_date: NaiveDate,
    /// Always `last_maintenance_date` + 45 days
    pub next_maintenance_date: NaiveDate,
    #[sqlx(rename = "type")]
    pub class: EquipmentClass,
}

impl Equipment {
    /// Display code of the unit, e.g. `211`
    pub fn code(&self) -> String {
        unit_code(self.id)
    }
}

pub fn unit_code(id: i32) -> String {
    format!("{:03}", id)
}

/// Query parameters for equipment listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Equipment class (ARMGC, QC). All classes when omitted.
    pub class: Option<String>,
}

/// One (unit id, class) pair of the fixed fleet catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i32,
    pub class: EquipmentClass,
}

/// Outcome of a catalog seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SeedReport {
    /// Units that did not exist and were provisioned
    pub inserted: u64,
    /// Existing units whose class was corrected
    pub reclassified: u64,
}
