//! Demand profile for one vehicle type, indexed by time step (dt).

pub mod codec;
pub mod column;
pub mod flag;

pub use column::{Column, GapPolicy};
pub use flag::CrudFlag;

use crate::error::Result;
use codec::{CrudFlagCodec, IdCodec, ModStampCodec, ValueCodec};
use serde::{Deserialize, Serialize};

/// Configuration for demand record writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordConfig {
    /// Handling of writes past the end of a column
    pub gap_policy: GapPolicy,
}

/// Persisted form of a demand record: four comma-separated fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandFields {
    pub vehicle_type_id: i64,
    pub content: Option<String>,
    pub ids: Option<String>,
    pub mod_stamps: Option<String>,
    pub crud_flags: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DemandRecord {
    vehicle_type_id: i64,
    values: Column<ValueCodec>,
    ids: Column<IdCodec>,
    mod_stamps: Column<ModStampCodec>,
    crud_flags: Column<CrudFlagCodec>,
    config: RecordConfig,
}

impl DemandRecord {
    /// Creates an empty record with all four fields unset
    pub fn new(vehicle_type_id: i64) -> Self {
        Self {
            vehicle_type_id,
            ..Self::default()
        }
    }

    pub fn from_fields(fields: DemandFields) -> Self {
        Self::with_config(fields, RecordConfig::default())
    }

    pub fn with_config(fields: DemandFields, config: RecordConfig) -> Self {
        Self {
            vehicle_type_id: fields.vehicle_type_id,
            values: Column::new(fields.content),
            ids: Column::new(fields.ids),
            mod_stamps: Column::new(fields.mod_stamps),
            crud_flags: Column::new(fields.crud_flags),
            config,
        }
    }

    pub fn config(&self) -> RecordConfig {
        self.config
    }

    pub fn to_fields(&self) -> DemandFields {
        DemandFields {
            vehicle_type_id: self.vehicle_type_id,
            content: self.content().map(str::to_string),
            ids: self.ids().map(str::to_string),
            mod_stamps: self.mod_stamps().map(str::to_string),
            crud_flags: self.crud_flags().map(str::to_string),
        }
    }

    pub fn into_fields(self) -> DemandFields {
        DemandFields {
            vehicle_type_id: self.vehicle_type_id,
            content: self.values.into_encoded(),
            ids: self.ids.into_encoded(),
            mod_stamps: self.mod_stamps.into_encoded(),
            crud_flags: self.crud_flags.into_encoded(),
        }
    }

    // Encoded fields
    pub fn content(&self) -> Option<&str> {
        self.values.encoded()
    }

    pub fn ids(&self) -> Option<&str> {
        self.ids.encoded()
    }

    pub fn mod_stamps(&self) -> Option<&str> {
        self.mod_stamps.encoded()
    }

    pub fn crud_flags(&self) -> Option<&str> {
        self.crud_flags.encoded()
    }

    pub fn set_content(&mut self, raw: Option<String>) {
        self.values.replace_encoded(raw);
    }

    pub fn set_ids(&mut self, raw: Option<String>) {
        self.ids.replace_encoded(raw);
    }

    pub fn set_mod_stamps(&mut self, raw: Option<String>) {
        self.mod_stamps.replace_encoded(raw);
    }

    pub fn set_crud_flags(&mut self, raw: Option<String>) {
        self.crud_flags.replace_encoded(raw);
    }

    pub fn vehicle_type_id(&self) -> i64 {
        self.vehicle_type_id
    }

    pub fn set_vehicle_type_id(&mut self, id: i64) {
        self.vehicle_type_id = id;
    }

    /// Returns true if `vehicle_type_id` is this record's vehicle type
    pub fn matches_vehicle_type(&self, vehicle_type_id: i64) -> bool {
        self.vehicle_type_id == vehicle_type_id
    }

    /// Checks the record is well formed.
    ///
    /// Always true for now; value and stamp checks belong here.
    pub fn is_valid(&self) -> bool {
        true
    }

    /// Number of demand values, i.e. the number of dt's
    pub fn demand_size(&self) -> Result<usize> {
        self.values.len()
    }

    pub fn demands(&self) -> Result<&[f64]> {
        self.values.items()
    }

    pub fn demand(&self, offset: usize) -> Result<f64> {
        self.values.get(offset).copied()
    }

    /// Sets the demand at `offset`. Writing offsets in order is fastest.
    pub fn set_demand(&mut self, offset: usize, value: f64) -> Result<()> {
        self.values.set(offset, value, self.config.gap_policy)
    }

    pub fn id(&self, offset: usize) -> Result<i64> {
        self.ids.get(offset).copied()
    }

    pub fn set_id(&mut self, offset: usize, id: i64) -> Result<()> {
        self.ids.set(offset, id, self.config.gap_policy)
    }

    pub fn mod_stamp(&self, offset: usize) -> Result<&str> {
        self.mod_stamps.get(offset).map(String::as_str)
    }

    pub fn set_mod_stamp(&mut self, offset: usize, stamp: impl Into<String>) -> Result<()> {
        self.mod_stamps.set(offset, stamp.into(), self.config.gap_policy)
    }

    pub fn crud_flag(&self, offset: usize) -> Result<CrudFlag> {
        self.crud_flags.get(offset).copied()
    }

    pub fn set_crud_flag(&mut self, offset: usize, flag: CrudFlag) -> Result<()> {
        self.crud_flags.set(offset, flag, self.config.gap_policy)
    }

    /// Sets the demand at `offset` plus whichever of id, stamp and flag are given.
    ///
    /// Missing overlays are left untouched at this offset, so the overlay
    /// columns can end up shorter than the demand column.
    ///
    /// Columns are written in order (demand, id, stamp, flag) and a failed
    /// write stops there: columns written before it keep their new value.
    pub fn set_demand_entry(
        &mut self,
        offset: usize,
        demand: f64,
        id: Option<i64>,
        mod_stamp: Option<String>,
        flag: Option<CrudFlag>,
    ) -> Result<()> {
        self.set_demand(offset, demand)?;
        if let Some(id) = id {
            self.set_id(offset, id)?;
        }
        if let Some(stamp) = mod_stamp {
            self.set_mod_stamp(offset, stamp)?;
        }
        if let Some(flag) = flag {
            self.set_crud_flag(offset, flag)?;
        }
        Ok(())
    }
}

impl From<DemandFields> for DemandRecord {
    fn from(fields: DemandFields) -> Self {
        Self::from_fields(fields)
    }
}
