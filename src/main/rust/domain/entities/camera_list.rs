use std::collections::HashSet;

use crate::domain::errors::{DomainError, Result};
use crate::domain::value_objects::{Camera, CameraId, StreamType};

/// Fields supplied by the add-camera form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCamera {
    pub name: String,
    pub url: String,
    pub stream_type: StreamType,
    pub enabled: bool,
}

impl NewCamera {
    pub fn new(name: impl Into<String>, url: impl Into<String>, stream_type: StreamType) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            stream_type,
            enabled: true,
        }
    }
}

/// Partial edit of an existing camera
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub stream_type: Option<StreamType>,
    pub enabled: Option<bool>,
    pub expanded: Option<bool>,
}

/// Ordered camera collection with contiguous `order` ranks from 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraList {
    cameras: Vec<Camera>,
}

impl CameraList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored records: sorted by `order`, ids checked, ranks renumbered
    pub fn from_cameras(mut cameras: Vec<Camera>) -> Result<Self> {
        let mut seen = HashSet::new();
        for camera in &cameras {
            if !seen.insert(camera.id.clone()) {
                return Err(DomainError::DuplicateCameraId(camera.id.to_string()));
            }
        }

        cameras.sort_by_key(|camera| camera.order);
        let mut list = Self { cameras };
        list.renumber();
        Ok(list)
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn get(&self, id: &CameraId) -> Option<&Camera> {
        self.cameras.iter().find(|camera| &camera.id == id)
    }

    pub fn add(&mut self, new_camera: NewCamera) -> Result<CameraId> {
        let camera = Camera {
            id: CameraId::generate(),
            name: new_camera.name,
            url: new_camera.url,
            stream_type: new_camera.stream_type,
            enabled: new_camera.enabled,
            order: self.cameras.len() as u32,
            expanded: None,
        };
        camera.validate()?;

        let id = camera.id.clone();
        self.cameras.push(camera);
        Ok(id)
    }

    pub fn update(&mut self, id: &CameraId, update: CameraUpdate) -> Result<&Camera> {
        let index = self.index_of(id)?;

        let mut edited = self.cameras[index].clone();
        if let Some(name) = update.name {
            edited.name = name;
        }
        if let Some(url) = update.url {
            edited.url = url;
        }
        if let Some(stream_type) = update.stream_type {
            edited.stream_type = stream_type;
        }
        if let Some(enabled) = update.enabled {
            edited.enabled = enabled;
        }
        if let Some(expanded) = update.expanded {
            edited.expanded = Some(expanded);
        }
        edited.validate()?;

        self.cameras[index] = edited;
        Ok(&self.cameras[index])
    }

    pub fn remove(&mut self, id: &CameraId) -> Result<Camera> {
        let index = self.index_of(id)?;
        let removed = self.cameras.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Apply a full new ordering; `ids` must be a permutation of the current ids
    pub fn reorder(&mut self, ids: &[CameraId]) -> Result<()> {
        if ids.len() != self.cameras.len() {
            return Err(DomainError::InvalidReorder);
        }

        let mut reordered = Vec::with_capacity(ids.len());
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(DomainError::InvalidReorder);
            }
            let camera = self.get(id).ok_or(DomainError::InvalidReorder)?;
            reordered.push(camera.clone());
        }

        self.cameras = reordered;
        self.renumber();
        Ok(())
    }

    /// Drag-end convenience: move the camera at `from` to position `to`
    pub fn move_camera(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.cameras.len();
        if from >= len || to >= len {
            return Err(DomainError::InvalidReorder);
        }
        if from != to {
            let camera = self.cameras.remove(from);
            self.cameras.insert(to, camera);
            self.renumber();
        }
        Ok(())
    }

    pub fn toggle_expanded(&mut self, id: &CameraId) -> Result<bool> {
        let index = self.index_of(id)?;
        let camera = &mut self.cameras[index];
        let expanded = !camera.is_expanded();
        camera.expanded = Some(expanded);
        Ok(expanded)
    }

    fn index_of(&self, id: &CameraId) -> Result<usize> {
        self.cameras
            .iter()
            .position(|camera| &camera.id == id)
            .ok_or_else(|| DomainError::CameraNotFound(id.to_string()))
    }

    fn renumber(&mut self) {
        for (index, camera) in self.cameras.iter_mut().enumerate() {
            camera.order = index as u32;
        }
    }
}
