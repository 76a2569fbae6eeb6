use crate::{
    crops::CropCatalog,
    error::{AppError, AppResult},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: Uuid,
    pub name: String,
    /// acres
    pub area_acres: f64,
    /// catalog name, validated on creation
    pub crop_name: String,
    pub created_at: DateTime<Utc>,
}

/// Registered plots in creation order, with at most one marked active.
#[derive(Debug, Default, Clone)]
pub struct PlotStore {
    plots: Vec<Plot>,
    active: Option<Uuid>,
}

impl PlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plot. A blank name gets a "Plot N" placeholder from the
    /// current count, so names can repeat after deletions.
    pub fn create_plot(
        &mut self, name: &str, area_acres: f64, crop_name: &str, catalog: &CropCatalog,
        created_at: DateTime<Utc>,
    ) -> AppResult<Plot> {
        if area_acres <= 0.0 {
            return Err(AppError::InvalidAcreage(area_acres));
        }
        catalog.get(crop_name)?;

        let name = if name.trim().is_empty() {
            format!("Plot {}", self.plots.len() + 1)
        } else {
            name.trim().to_owned()
        };
        let plot = Plot {
            id: Uuid::new_v4(),
            name,
            area_acres,
            crop_name: crop_name.to_owned(),
            created_at,
        };
        self.plots.push(plot.clone());
        Ok(plot)
    }

    pub fn list(&self) -> &[Plot] {
        &self.plots
    }

    pub fn get(&self, id: Uuid) -> Option<&Plot> {
        self.plots.iter().find(|plot| plot.id == id)
    }

    /// Remove a plot. Deleting the active plot also clears the selection.
    /// Unknown ids are a no-op reported as `false`.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.plots.len();
        self.plots.retain(|plot| plot.id != id);
        let removed = self.plots.len() != before;
        if removed && self.active == Some(id) {
            self.active = None;
        }
        removed
    }

    pub fn set_active(&mut self, id: Uuid) -> bool {
        if self.plots.iter().any(|plot| plot.id == id) {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_active(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn active(&self) -> Option<&Plot> {
        self.active.and_then(|id| self.get(id))
    }

    /// Drop every plot and the active selection in one step.
    pub fn clear_all(&mut self) {
        self.plots.clear();
        self.active = None;
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }
}
