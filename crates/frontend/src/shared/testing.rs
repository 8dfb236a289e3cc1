//! Deterministic doubles for the network and browser seams.

use super::api::{ApiError, ApiRequest, ApiResponse, Transport};
use super::artifact::ObjectUrls;
use super::lookup::{GeoLookup, LookupError, PlateInfo, PlateLookup};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

/// Transport answering from a script and recording what was sent.
/// Clones share the script and the record.
#[derive(Clone, Default)]
pub struct FakeTransport {
    script: Rc<RefCell<VecDeque<Result<ApiResponse, ApiError>>>>,
    sent: Rc<RefCell<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_raw(status, body.to_string().into_bytes());
    }

    pub fn push_raw(&self, status: u16, body: Vec<u8>) {
        self.script
            .borrow_mut()
            .push_back(Ok(ApiResponse { status, body }));
    }

    pub fn push_failure(&self, reason: &str) {
        self.script
            .borrow_mut()
            .push_back(Err(ApiError::Connection(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Connection("no scripted response".into())))
    }
}

/// Geo lookup over fixed data
#[derive(Clone, Default)]
pub struct FakeGeo {
    pub regions: Vec<String>,
    pub communes: BTreeMap<String, Vec<String>>,
    pub down: bool,
}

impl FakeGeo {
    pub fn with(region: &str, communes: &[&str]) -> Self {
        let mut geo = Self::default();
        geo.regions.push(region.to_string());
        geo.communes.insert(
            region.to_string(),
            communes.iter().map(|c| c.to_string()).collect(),
        );
        geo
    }
}

#[async_trait(?Send)]
impl GeoLookup for FakeGeo {
    async fn regions(&self) -> Result<Vec<String>, LookupError> {
        if self.down {
            return Err(LookupError::Unreachable("down".into()));
        }
        Ok(self.regions.clone())
    }

    async fn communes(&self, region_name: &str) -> Result<Vec<String>, LookupError> {
        if self.down {
            return Err(LookupError::Unreachable("down".into()));
        }
        Ok(self.communes.get(region_name).cloned().unwrap_or_default())
    }
}

/// Plate lookup answering the same thing every time and counting calls
#[derive(Clone)]
pub struct FakePlateLookup {
    answer: Result<Option<PlateInfo>, LookupError>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakePlateLookup {
    pub fn found(info: PlateInfo) -> Self {
        Self::answering(Ok(Some(info)))
    }

    pub fn missing() -> Self {
        Self::answering(Ok(None))
    }

    pub fn unreachable() -> Self {
        Self::answering(Err(LookupError::Unreachable("offline".into())))
    }

    fn answering(answer: Result<Option<PlateInfo>, LookupError>) -> Self {
        Self {
            answer,
            calls: Rc::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PlateLookup for FakePlateLookup {
    async fn lookup_plate(&self, plate: &str) -> Result<Option<PlateInfo>, LookupError> {
        self.calls.borrow_mut().push(plate.to_string());
        self.answer.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlEvent {
    Created(String),
    Revoked(String),
}

/// Object URL factory that only records
#[derive(Default)]
pub struct RecordingUrls {
    events: RefCell<Vec<UrlEvent>>,
    fail: bool,
}

impl RecordingUrls {
    pub fn failing() -> Self {
        Self {
            events: RefCell::default(),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<UrlEvent> {
        self.events.borrow().clone()
    }

    /// URLs created and not yet revoked
    pub fn live(&self) -> usize {
        let events = self.events.borrow();
        let created = events
            .iter()
            .filter(|e| matches!(e, UrlEvent::Created(_)))
            .count();
        created - (events.len() - created)
    }
}

impl ObjectUrls for RecordingUrls {
    fn create(&self, _bytes: &[u8], _mime: &str) -> Result<String, String> {
        if self.fail {
            return Err("blob rejected".into());
        }
        let mut events = self.events.borrow_mut();
        let url = format!("blob:test/{}", events.len());
        events.push(UrlEvent::Created(url.clone()));
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        self.events
            .borrow_mut()
            .push(UrlEvent::Revoked(url.to_string()));
    }
}
