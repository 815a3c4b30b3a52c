// Host-side tests for mount, resize and unmount against a recording host.

use echo_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
struct HostLog {
    now: Duration,
    viewport: Viewport,
    next_frame: i32,
    requested: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
    added: Vec<ListenerHandle>,
    removed: Vec<ListenerHandle>,
    refuse_listener: bool,
}

#[derive(Clone, Default)]
struct RecordingHost(Rc<RefCell<HostLog>>);

impl RecordingHost {
    fn with_viewport(width: u32, height: u32) -> Self {
        let host = Self::default();
        host.0.borrow_mut().viewport = Viewport::new(width, height);
        host
    }

    fn advance(&self, dt: Duration) {
        self.0.borrow_mut().now += dt;
    }

    fn set_viewport(&self, viewport: Viewport) {
        self.0.borrow_mut().viewport = viewport;
    }
}

impl Host for RecordingHost {
    fn now(&self) -> Duration {
        self.0.borrow().now
    }

    fn viewport(&self) -> Viewport {
        self.0.borrow().viewport
    }

    fn request_frame(&mut self) -> Result<FrameHandle, HostError> {
        let mut log = self.0.borrow_mut();
        log.next_frame += 1;
        let handle = FrameHandle(log.next_frame);
        log.requested.push(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.0.borrow_mut().cancelled.push(handle);
    }

    fn add_resize_listener(&mut self) -> Result<ListenerHandle, HostError> {
        let mut log = self.0.borrow_mut();
        if log.refuse_listener {
            return Err(HostError::Listener("refused".into()));
        }
        let handle = ListenerHandle(log.added.len() as u32 + 1);
        log.added.push(handle);
        Ok(handle)
    }

    fn remove_resize_listener(&mut self, handle: ListenerHandle) {
        self.0.borrow_mut().removed.push(handle);
    }
}

#[derive(Default)]
struct CanvasLog {
    resizes: Vec<Viewport>,
    draws: usize,
    last_len: usize,
}

#[derive(Clone, Default)]
struct RecordingCanvas(Rc<RefCell<CanvasLog>>);

impl Canvas for RecordingCanvas {
    fn resize(&mut self, viewport: Viewport) {
        self.0.borrow_mut().resizes.push(viewport);
    }

    fn draw(&mut self, list: &DisplayList) {
        let mut log = self.0.borrow_mut();
        log.draws += 1;
        log.last_len = list.len();
    }
}

fn aura() -> AnimationConfig {
    AnimationConfig::for_variant(Variant::RingAura).with_seed(21)
}

fn mounted() -> (
    Animator<RecordingHost, RecordingCanvas>,
    RecordingHost,
    RecordingCanvas,
) {
    let host = RecordingHost::with_viewport(1440, 900);
    let canvas = RecordingCanvas::default();
    let animator =
        Animator::mount(host.clone(), Some(canvas.clone()), aura()).expect("valid config");
    (animator, host, canvas)
}

fn run_frames(animator: &mut Animator<RecordingHost, RecordingCanvas>, host: &RecordingHost, n: usize) {
    for _ in 0..n {
        host.advance(Duration::from_millis(16));
        assert!(animator.on_frame());
    }
}

#[test]
fn mount_registers_once_and_sizes_canvas() {
    let (animator, host, canvas) = mounted();
    assert_eq!(animator.state(), MountState::Running);
    let log = host.0.borrow();
    assert_eq!(log.added.len(), 1);
    assert_eq!(log.requested.len(), 1);
    assert_eq!(canvas.0.borrow().resizes, vec![Viewport::new(1440, 900)]);
}

#[test]
fn each_frame_draws_and_schedules_the_next() {
    let (mut animator, host, canvas) = mounted();
    run_frames(&mut animator, &host, 5);
    assert_eq!(canvas.0.borrow().draws, 5);
    assert!(canvas.0.borrow().last_len > 0);
    assert_eq!(host.0.borrow().requested.len(), 6);
    assert_eq!(animator.scene().stats().frames, 5);
}

#[test]
fn unmount_releases_everything_exactly_once() {
    let (mut animator, host, canvas) = mounted();
    run_frames(&mut animator, &host, 3);
    let pending = *host.0.borrow().requested.last().expect("a frame is pending");

    animator.unmount();
    assert_eq!(animator.state(), MountState::Unmounted);
    {
        let log = host.0.borrow();
        assert_eq!(log.cancelled, vec![pending]);
        assert_eq!(log.removed, log.added);
    }

    // A frame callback already queued by the host runs after unmount
    host.advance(Duration::from_millis(16));
    assert!(!animator.on_frame());
    assert_eq!(canvas.0.borrow().draws, 3);
    assert_eq!(animator.scene().stats().frames, 3);
    assert_eq!(host.0.borrow().requested.len(), 4);

    animator.unmount();
    drop(animator);
    let log = host.0.borrow();
    assert_eq!(log.cancelled.len(), 1);
    assert_eq!(log.removed.len(), 1);
}

#[test]
fn drop_unmounts() {
    let (animator, host, _canvas) = mounted();
    drop(animator);
    let log = host.0.borrow();
    assert_eq!(log.cancelled.len(), 1);
    assert_eq!(log.removed.len(), 1);
}

#[test]
fn missing_canvas_mounts_inert() {
    let host = RecordingHost::with_viewport(800, 600);
    let mut animator: Animator<RecordingHost, RecordingCanvas> =
        Animator::mount(host.clone(), None, aura()).expect("valid config");
    assert_eq!(animator.state(), MountState::Inert);
    assert!(!animator.on_frame());
    animator.unmount();
    let log = host.0.borrow();
    assert!(log.requested.is_empty());
    assert!(log.added.is_empty());
    assert!(log.cancelled.is_empty());
    assert!(log.removed.is_empty());
}

#[test]
fn refused_listener_still_animates() {
    let host = RecordingHost::with_viewport(800, 600);
    host.0.borrow_mut().refuse_listener = true;
    let canvas = RecordingCanvas::default();
    let mut animator = Animator::mount(host.clone(), Some(canvas.clone()), aura()).expect("valid");
    run_frames(&mut animator, &host, 2);
    animator.unmount();
    let log = host.0.borrow();
    assert!(log.removed.is_empty());
    assert_eq!(log.cancelled.len(), 1);
    assert_eq!(canvas.0.borrow().draws, 2);
}

#[test]
fn resize_is_idempotent_and_keeps_live_centers() {
    let (mut animator, host, canvas) = mounted();
    run_frames(&mut animator, &host, 1);
    let before: Vec<_> = animator
        .scene()
        .simulation()
        .live()
        .iter()
        .map(|p| p.center())
        .collect();
    assert!(!before.is_empty());

    host.set_viewport(Viewport::new(1024, 768));
    animator.on_resize();
    animator.on_resize();
    assert_eq!(canvas.0.borrow().resizes.len(), 2);
    assert_eq!(animator.scene().surface().resize_count(), 1);

    let after: Vec<_> = animator
        .scene()
        .simulation()
        .live()
        .iter()
        .map(|p| p.center())
        .collect();
    assert_eq!(before, after);

    // The next seed lands at the new anchor
    host.advance(Duration::from_millis(2_000));
    assert!(animator.on_frame());
    let newest = animator
        .scene()
        .simulation()
        .live()
        .last()
        .expect("seed spawned")
        .center();
    assert_eq!(newest, Viewport::new(1024, 768).anchor());
}

#[test]
fn resize_after_unmount_is_ignored() {
    let (mut animator, host, canvas) = mounted();
    animator.unmount();
    host.set_viewport(Viewport::new(320, 240));
    animator.on_resize();
    assert_eq!(canvas.0.borrow().resizes.len(), 1);
}

#[test]
fn invalid_config_fails_to_mount() {
    let mut config = aura();
    config.lifetime = Range::new(0.0, 0.0);
    let host = RecordingHost::with_viewport(800, 600);
    let result = Animator::mount(host.clone(), Some(RecordingCanvas::default()), config);
    assert!(matches!(result, Err(ConfigError::ZeroLifetime(_))));
    assert!(host.0.borrow().requested.is_empty());
}

#[test]
fn scene_time_starts_at_mount_not_at_host_creation() {
    let host = RecordingHost::with_viewport(1440, 900);
    // The host has been running for a while before anything mounts
    host.advance(Duration::from_secs(30));
    let mut animator = Animator::mount(host.clone(), Some(RecordingCanvas::default()), aura())
        .expect("valid config");

    host.advance(Duration::from_millis(16));
    assert!(animator.on_frame());
    // Only the seed due at mount has fired; the 2 s and 4 s seeds are still pending
    assert_eq!(animator.scene().stats().spawned, 1);
    assert_eq!(animator.scene().emitter().pending_seeds(), 2);

    host.advance(Duration::from_millis(2_000));
    assert!(animator.on_frame());
    assert_eq!(animator.scene().stats().spawned, 2);
}
