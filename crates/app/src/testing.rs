//! Shared fakes for the core's unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use irrigo_domain::endpoint;
use irrigo_domain::error::{ControllerError, RenderError};
use irrigo_domain::id::ChannelIndex;
use irrigo_domain::network::{SensorProbe, WifiNetwork};
use irrigo_domain::request::{
    AddPlantRequest, DeletePlantRequest, UpdateConfigRequest, WaterRequest, WifiCredentials,
};
use irrigo_domain::snapshot::Snapshot;

use crate::ports::{ControllerApi, Dashboard, LinkStatus, ListContainer, Timer, UserInteraction};
use crate::view::{EnvironmentReadout, Fragment};

/// A request the fake controller received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchSnapshot,
    AddPlant(AddPlantRequest),
    Water(WaterRequest),
    DeletePlant(DeletePlantRequest),
    UpdateConfig(UpdateConfigRequest),
    SaveWifi(WifiCredentials),
    Reboot,
    Scan,
    Detect(ChannelIndex),
}

#[derive(Default)]
struct ControllerState {
    snapshots: VecDeque<Option<Snapshot>>,
    calls: Vec<Call>,
    offline: bool,
    rejection: Option<u16>,
}

/// Scripted controller: `fetch_snapshot` pops queued responses and fails
/// once the queue is empty.
#[derive(Clone, Default)]
pub struct FakeController {
    state: Rc<RefCell<ControllerState>>,
}

impl FakeController {
    pub fn push_snapshot(&self, body: &str) {
        let snapshot = Snapshot::from_json(body).unwrap();
        self.state.borrow_mut().snapshots.push_back(Some(snapshot));
    }

    pub fn push_failure(&self) {
        self.state.borrow_mut().snapshots.push_back(None);
    }

    /// Make every mutating request fail with a transport error.
    pub fn go_offline(&self) {
        self.state.borrow_mut().offline = true;
    }

    /// Make every mutating request come back with HTTP `status`.
    pub fn reject_with(&self, status: u16) {
        self.state.borrow_mut().rejection = Some(status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::FetchSnapshot)
            .count()
    }

    fn record(&self, call: Call, endpoint: &'static str) -> Result<(), ControllerError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        if state.offline {
            return Err(ControllerError::Transport {
                endpoint,
                source: "controller unreachable".into(),
            });
        }
        if let Some(status) = state.rejection {
            return Err(ControllerError::Status { endpoint, status });
        }
        Ok(())
    }
}

impl ControllerApi for FakeController {
    async fn fetch_snapshot(&self) -> Result<Snapshot, ControllerError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::FetchSnapshot);
        state
            .snapshots
            .pop_front()
            .flatten()
            .ok_or_else(|| ControllerError::Transport {
                endpoint: endpoint::DATA,
                source: "no response".into(),
            })
    }

    async fn add_plant(&self, request: &AddPlantRequest) -> Result<(), ControllerError> {
        self.record(Call::AddPlant(request.clone()), endpoint::ADD_PLANT)
    }

    async fn water(&self, request: WaterRequest) -> Result<(), ControllerError> {
        self.record(Call::Water(request), endpoint::WATER)
    }

    async fn delete_plant(&self, request: DeletePlantRequest) -> Result<(), ControllerError> {
        self.record(Call::DeletePlant(request), endpoint::DELETE_PLANT)
    }

    async fn update_config(&self, request: UpdateConfigRequest) -> Result<(), ControllerError> {
        self.record(Call::UpdateConfig(request), endpoint::UPDATE_CONFIG)
    }

    async fn save_wifi(&self, credentials: &WifiCredentials) -> Result<(), ControllerError> {
        self.record(Call::SaveWifi(credentials.clone()), endpoint::SAVE_WIFI)
    }

    async fn reboot(&self) -> Result<(), ControllerError> {
        self.record(Call::Reboot, endpoint::REBOOT)
    }

    async fn scan_networks(&self) -> Result<Vec<WifiNetwork>, ControllerError> {
        self.record(Call::Scan, endpoint::SCAN)?;
        Ok(vec![WifiNetwork {
            ssid: "greenhouse".to_string(),
            secure: true,
        }])
    }

    async fn detect_sensor(&self, channel: ChannelIndex) -> Result<SensorProbe, ControllerError> {
        self.record(Call::Detect(channel), endpoint::DETECT_SENSOR)?;
        Ok(SensorProbe {
            raw: 1234,
            mode: "Analog".to_string(),
        })
    }
}

/// Timer on tokio's clock that counts how many delays were scheduled.
#[derive(Clone, Default)]
pub struct CountingTimer {
    scheduled: Rc<RefCell<Vec<Duration>>>,
}

impl CountingTimer {
    pub fn scheduled(&self) -> Vec<Duration> {
        self.scheduled.borrow().clone()
    }
}

impl Timer for CountingTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.scheduled.borrow_mut().push(duration);
        tokio::time::sleep(duration)
    }
}

#[derive(Default)]
struct DashboardState {
    readouts: Vec<EnvironmentReadout>,
    status_lines: Vec<String>,
    mounted: Vec<Fragment>,
    links: Vec<LinkStatus>,
}

/// Dashboard recording everything pushed to it.
#[derive(Clone)]
pub struct RecordingDashboard {
    state: Rc<RefCell<DashboardState>>,
    list_present: bool,
    list_fails: bool,
}

impl Default for RecordingDashboard {
    fn default() -> Self {
        Self {
            state: Rc::default(),
            list_present: true,
            list_fails: false,
        }
    }
}

impl RecordingDashboard {
    pub fn without_list() -> Self {
        Self {
            list_present: false,
            ..Self::default()
        }
    }

    pub fn with_failing_list() -> Self {
        Self {
            list_fails: true,
            ..Self::default()
        }
    }

    pub fn mounted(&self) -> Vec<Fragment> {
        self.state.borrow().mounted.clone()
    }

    pub fn last_readout(&self) -> Option<EnvironmentReadout> {
        self.state.borrow().readouts.last().cloned()
    }

    pub fn status_lines(&self) -> Vec<String> {
        self.state.borrow().status_lines.clone()
    }

    pub fn links(&self) -> Vec<LinkStatus> {
        self.state.borrow().links.clone()
    }
}

pub struct RecordingList {
    state: Rc<RefCell<DashboardState>>,
    fails: bool,
}

impl ListContainer for RecordingList {
    fn replace_children(&mut self, fragment: Fragment) -> Result<(), RenderError> {
        if self.fails {
            return Err(RenderError {
                target: "plant-list",
                reason: "detached".to_string(),
            });
        }
        self.state.borrow_mut().mounted.push(fragment);
        Ok(())
    }
}

impl Dashboard for RecordingDashboard {
    type List = RecordingList;

    fn show_environment(&self, readout: &EnvironmentReadout) {
        self.state.borrow_mut().readouts.push(readout.clone());
    }

    fn show_status(&self, line: &str) {
        self.state.borrow_mut().status_lines.push(line.to_string());
    }

    fn plant_list(&self) -> Option<Self::List> {
        self.list_present.then(|| RecordingList {
            state: Rc::clone(&self.state),
            fails: self.list_fails,
        })
    }

    fn show_link(&self, status: LinkStatus) {
        self.state.borrow_mut().links.push(status);
    }
}

/// User stand-in with a fixed answer to every confirmation.
#[derive(Clone)]
pub struct ScriptedUser {
    answer: bool,
    prompts: Rc<RefCell<Vec<String>>>,
    notices: Rc<RefCell<Vec<String>>>,
    modal_closes: Rc<Cell<u32>>,
}

impl ScriptedUser {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Rc::default(),
            notices: Rc::default(),
            modal_closes: Rc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    pub fn modal_closes(&self) -> u32 {
        self.modal_closes.get()
    }
}

impl UserInteraction for ScriptedUser {
    async fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn close_modals(&self) {
        self.modal_closes.set(self.modal_closes.get() + 1);
    }
}
