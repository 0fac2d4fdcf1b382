//! Workspace: datasets + current selection.

use serde::{Deserialize, Serialize};

use crate::domain::{FitType, Sample};
use crate::error::AppError;
use crate::session::palette::color_for;

/// One named series of points with its own fit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: u64,
    pub name: String,
    pub points: Vec<Sample>,
    pub color: String,
    pub fit_type: FitType,
    pub visible: bool,
}

/// Ordered datasets plus the id of the one being edited.
///
/// A workspace always contains at least one dataset; removing the last one
/// creates a fresh replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    datasets: Vec<Dataset>,
    current_id: u64,
    next_id: u64,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        let mut ws = Self {
            datasets: Vec::new(),
            current_id: 0,
            next_id: 1,
        };
        ws.create_dataset();
        ws
    }

    /// Build a workspace from already-named point sets (CSV ingest, demos).
    ///
    /// The first dataset becomes current. An empty input gives `Workspace::new()`.
    pub fn from_named_points(sets: Vec<(String, Vec<Sample>)>) -> Self {
        let mut ws = Self {
            datasets: Vec::new(),
            current_id: 0,
            next_id: 1,
        };
        for (name, points) in sets {
            let id = ws.create_dataset();
            if let Some(ds) = ws.get_mut(id) {
                ds.name = name;
                ds.points = points;
            }
        }
        if ws.datasets.is_empty() {
            ws.create_dataset();
        }
        ws.current_id = ws.datasets[0].id;
        ws
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn current_id(&self) -> u64 {
        self.current_id
    }

    pub fn current(&self) -> Option<&Dataset> {
        self.get(self.current_id)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.datasets.iter().position(|d| d.id == self.current_id)
    }

    pub fn get(&self, id: u64) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Dataset> {
        self.datasets.iter_mut().find(|d| d.id == id)
    }

    fn current_mut(&mut self) -> Result<&mut Dataset, AppError> {
        let id = self.current_id;
        self.get_mut(id)
            .ok_or_else(|| AppError::new(4, "No current dataset."))
    }

    /// Check a workspace that did not come from `new`/`create_dataset`
    /// (e.g. one deserialized from JSON) and repair what can be repaired.
    ///
    /// Empty workspaces and duplicate dataset ids are rejected. `next_id` is
    /// raised past every existing id and a stale current id falls back to the
    /// first dataset.
    pub fn validate(&mut self) -> Result<(), AppError> {
        let Some(max_id) = self.datasets.iter().map(|d| d.id).max() else {
            return Err(AppError::new(2, "Workspace contains no datasets."));
        };

        let mut ids: Vec<u64> = self.datasets.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(AppError::new(2, format!("Duplicate dataset id {}.", w[0])));
        }

        self.next_id = self.next_id.max(max_id + 1);
        if self.current().is_none() {
            self.current_id = self.datasets[0].id;
        }
        Ok(())
    }

    /// Append a new empty dataset and make it current. Returns its id.
    pub fn create_dataset(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let dataset = Dataset {
            id,
            name: format!("Dataset {}", self.datasets.len() + 1),
            points: Vec::new(),
            color: color_for(self.datasets.len()).to_string(),
            fit_type: FitType::Auto,
            visible: true,
        };
        self.datasets.push(dataset);
        self.current_id = id;
        id
    }

    /// Remove a dataset. Returns `false` when no dataset has `id`.
    ///
    /// If the removed dataset was current, the first remaining one becomes
    /// current; if none remain, a fresh dataset is created.
    pub fn delete_dataset(&mut self, id: u64) -> bool {
        let Some(index) = self.datasets.iter().position(|d| d.id == id) else {
            return false;
        };
        self.datasets.remove(index);

        if self.datasets.is_empty() {
            self.create_dataset();
        } else if self.current_id == id {
            self.current_id = self.datasets[0].id;
        }
        true
    }

    /// Drop every dataset and start over with a single empty one.
    pub fn clear(&mut self) {
        self.datasets.clear();
        self.create_dataset();
    }

    pub fn select(&mut self, id: u64) -> bool {
        if self.get(id).is_some() {
            self.current_id = id;
            true
        } else {
            false
        }
    }

    /// Move the selection by `delta` positions, clamped to the list bounds.
    pub fn select_relative(&mut self, delta: isize) {
        let Some(index) = self.current_index() else {
            return;
        };
        let last = self.datasets.len() as isize - 1;
        let next = (index as isize + delta).clamp(0, last) as usize;
        self.current_id = self.datasets[next].id;
    }

    pub fn toggle_visibility(&mut self, id: u64) -> bool {
        match self.get_mut(id) {
            Some(ds) => {
                ds.visible = !ds.visible;
                true
            }
            None => false,
        }
    }

    pub fn rename(&mut self, id: u64, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(ds) => {
                ds.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_fit_type(&mut self, id: u64, fit_type: FitType) -> bool {
        match self.get_mut(id) {
            Some(ds) => {
                ds.fit_type = fit_type;
                true
            }
            None => false,
        }
    }

    /// Append a point to the current dataset.
    pub fn add_point(&mut self, x: f64, y: f64) -> Result<(), AppError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(AppError::new(2, "Please enter valid numbers."));
        }
        self.current_mut()?.points.push(Sample { x, y });
        Ok(())
    }

    /// Remove the point at `index` from dataset `id`.
    pub fn remove_point(&mut self, id: u64, index: usize) -> Option<Sample> {
        let ds = self.get_mut(id)?;
        if index < ds.points.len() {
            Some(ds.points.remove(index))
        } else {
            None
        }
    }

    /// Every point of every dataset, visible or not.
    pub fn all_points(&self) -> impl Iterator<Item = &Sample> {
        self.datasets.iter().flat_map(|d| d.points.iter())
    }
}
