use crate::error::{DrillError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Anything a `Roster` can hold: an owned, id-bearing, serialisable record.
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Ord + Clone + Display;
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Employee {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            department: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

impl Record for Employee {
    type Id = u32;
    const KIND: &'static str = "employee";

    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub grades: Vec<u8>,
}

impl Student {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            grades: Vec::new(),
        }
    }

    pub fn average(&self) -> Option<f64> {
        if self.grades.is_empty() {
            return None;
        }
        let total: u32 = self.grades.iter().map(|&g| u32::from(g)).sum();
        Some(f64::from(total) / self.grades.len() as f64)
    }
}

impl Record for Student {
    type Id = u32;
    const KIND: &'static str = "student";

    fn id(&self) -> u32 {
        self.id
    }
}

/// Records keyed by id, iterated in id order.
pub struct Roster<R: Record> {
    records: BTreeMap<R::Id, R>,
}

impl<R: Record> Default for Roster<R> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<R: Record> Roster<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: R) -> Result<()> {
        let id = record.id();
        if self.records.contains_key(&id) {
            return Err(DrillError::duplicate(R::KIND, id));
        }
        self.records.insert(id, record);
        Ok(())
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.records.get(id)
    }

    /// Replaces the record with the same id, returning the previous one.
    pub fn update(&mut self, record: R) -> Result<R> {
        let id = record.id();
        match self.records.get_mut(&id) {
            Some(slot) => Ok(std::mem::replace(slot, record)),
            None => Err(DrillError::not_found(R::KIND, id)),
        }
    }

    pub fn remove(&mut self, id: &R::Id) -> Result<R> {
        self.records
            .remove(id)
            .ok_or_else(|| DrillError::not_found(R::KIND, id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        let records: Vec<&R> = self.iter().collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<R> = serde_json::from_str(json)?;
        let mut roster = Self::new();
        for record in records {
            roster.add(record)?;
        }
        Ok(roster)
    }
}
