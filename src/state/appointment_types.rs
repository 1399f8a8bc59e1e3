//! Appointment type cache for the dashboard and the public booking page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard manages the signed-in user's types through
//! [`AppointmentTypesApi`]; the public booking page lists a business's types
//! through [`ClientFacingApi`]. Both land in one id-keyed map so lookups by
//! id stay O(log n) and list order is stable.

#[cfg(test)]
#[path = "appointment_types_test.rs"]
mod appointment_types_test;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::watch;

use super::{Loading, LoadingGuard};
use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::types::{AppointmentType, CreateAppointmentTypeParams, UpdateAppointmentTypeParams};
use crate::notify::Notifier;
use crate::resources::appointment_types::AppointmentTypesApi;
use crate::resources::client_facing::ClientFacingApi;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppointmentTypesState {
    pub items: BTreeMap<i32, AppointmentType>,
    pub selected: Option<i32>,
    /// True until the first load completes and while any action is in flight.
    pub loading: bool,
}

impl Default for AppointmentTypesState {
    fn default() -> Self {
        Self { items: BTreeMap::new(), selected: None, loading: true }
    }
}

impl Loading for AppointmentTypesState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

pub struct AppointmentTypesStore {
    api: AppointmentTypesApi,
    public: ClientFacingApi,
    state: watch::Sender<AppointmentTypesState>,
}

impl AppointmentTypesStore {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api: AppointmentTypesApi::new(client.clone(), notifier),
            public: ClientFacingApi::new(client),
            state: watch::Sender::new(AppointmentTypesState::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> AppointmentTypesState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppointmentTypesState> {
        self.state.subscribe()
    }

    /// Initial load for the dashboard.
    ///
    /// # Errors
    ///
    /// See [`AppointmentTypesStore::fetch_all`].
    pub async fn mount(&self) -> Result<(), ClientError> {
        self.fetch_all().await
    }

    /// Replace the cache with the signed-in user's types.
    ///
    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn fetch_all(&self) -> Result<(), ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let items = self.api.fetch_all().await?;
        self.replace_all(items);
        Ok(())
    }

    /// Replace the cache with a business's public types.
    ///
    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn fetch_for_business(&self, business_id: i32) -> Result<(), ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let items = self
            .public
            .appointment_types(business_id)
            .await?;
        self.replace_all(items);
        Ok(())
    }

    /// Fetch one type and upsert it.
    ///
    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn fetch_one(&self, id: i32) -> Result<AppointmentType, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let item = self.api.fetch_one(id).await?;
        self.state.send_modify(|s| {
            s.items.insert(item.id, item.clone());
        });
        Ok(item)
    }

    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn create(&self, params: &CreateAppointmentTypeParams) -> Result<AppointmentType, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let created = self.api.create(params).await?;
        self.state.send_modify(|s| {
            s.items.insert(created.id, created.clone());
        });
        Ok(created)
    }

    /// Update a type. The cached entry is replaced only if still present.
    ///
    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn update(&self, id: i32, params: &UpdateAppointmentTypeParams) -> Result<AppointmentType, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let updated = self.api.update(id, params).await?;
        self.state.send_modify(|s| {
            if let Some(entry) = s.items.get_mut(&updated.id) {
                *entry = updated.clone();
            }
        });
        Ok(updated)
    }

    /// Delete a type and drop it from the cache and the selection.
    ///
    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        self.api.destroy(id).await?;
        self.state.send_modify(|s| {
            s.items.remove(&id);
            if s.selected == Some(id) {
                s.selected = None;
            }
        });
        Ok(())
    }

    /// Select a type by id, or clear the selection with `None`.
    pub fn select(&self, id: Option<i32>) {
        self.state.send_modify(|s| s.selected = id);
    }

    /// The selected type, if it is still cached.
    #[must_use]
    pub fn selected(&self) -> Option<AppointmentType> {
        let state = self.state.borrow();
        state.selected.and_then(|id| state.items.get(&id).cloned())
    }

    #[must_use]
    pub fn get(&self, id: i32) -> Option<AppointmentType> {
        self.state.borrow().items.get(&id).cloned()
    }

    /// Cached types in ascending id order.
    #[must_use]
    pub fn list(&self) -> Vec<AppointmentType> {
        self.state.borrow().items.values().cloned().collect()
    }

    fn replace_all(&self, items: Vec<AppointmentType>) {
        let items: BTreeMap<i32, AppointmentType> = items.into_iter().map(|item| (item.id, item)).collect();
        tracing::debug!(count = items.len(), "appointment types loaded");
        self.state.send_modify(|s| {
            if s.selected.is_some_and(|id| !items.contains_key(&id)) {
                s.selected = None;
            }
            s.items = items;
        });
    }
}
