use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use crate::backoff::ReadBackoff;
use crate::health::{HealthConfig, HealthMonitor};
use crate::register::{
    CMD_LOADPROTOCOL, CMD_TRANSCEIVE, ISO14443A_CMD_REQA, ISO14443A_CMD_SELECT_CL1, REG_COMMAND,
    REG_FIFO_DATA, REG_FIFO_LENGTH, REG_VERSION,
};
use crate::tag::TagMatcher;
use crate::transport::NfcTransport;
use crate::types::{Clrc663Error, ErrorCode, bytes_to_hex};

/// Polling driver for the CLRC663 NFC reader.
///
/// The driver owns its transport exclusively and runs on host-supplied
/// ticks: call [`poll`](Clrc663::poll) at the desired scan cadence and
/// [`tick`](Clrc663::tick) from every loop iteration for health
/// supervision. Both take a monotonic millisecond counter so the driver
/// never reads the clock itself.
///
/// Tag arrival and removal are reported through registered callbacks as
/// uppercase hex UID strings; per-tag presence levels are reported through
/// registered [`TagMatcher`] handles.
pub struct Clrc663<T: NfcTransport> {
    transport: T,
    current_uid: Vec<u8>,
    tags: Vec<Rc<RefCell<TagMatcher>>>,
    on_tag_callbacks: Vec<Box<dyn FnMut(&str)>>,
    on_tag_removed_callbacks: Vec<Box<dyn FnMut(&str)>>,
    backoff: ReadBackoff,
    health: HealthMonitor,
    failed: bool,
    error_code: ErrorCode,
}

impl<T: NfcTransport> Clrc663<T> {
    const SETUP_ATTEMPTS: u32 = 3;
    const SETUP_RETRY_DELAY_MS: u64 = 100;
    const RESET_SETTLE_MS: u64 = 50;
    const PROTOCOL_SETTLE_MS: u64 = 5;
    const TRANSCEIVE_SETTLE_MS: u64 = 10;

    /// Create a new driver instance with the given transport
    pub fn new(transport: T, health_config: HealthConfig) -> Self {
        Self {
            transport,
            current_uid: Vec::new(),
            tags: Vec::new(),
            on_tag_callbacks: Vec::new(),
            on_tag_removed_callbacks: Vec::new(),
            backoff: ReadBackoff::default(),
            health: HealthMonitor::new(health_config),
            failed: false,
            error_code: ErrorCode::None,
        }
    }

    /// Register a tag matcher; the driver drives it from every poll cycle.
    /// Keep a clone of the handle to read its presence level.
    pub fn register_tag(&mut self, tag: Rc<RefCell<TagMatcher>>) {
        self.tags.push(tag);
    }

    /// Register a callback fired once when a new tag appears
    pub fn add_on_tag_callback(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_tag_callbacks.push(Box::new(callback));
    }

    /// Register a callback fired once when the tracked tag leaves the field
    pub fn add_on_tag_removed_callback(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_tag_removed_callbacks.push(Box::new(callback));
    }

    /// Reset the chip and verify communication, retrying up to 3 times.
    ///
    /// Exhausting all attempts marks the driver permanently failed with
    /// [`ErrorCode::WakeupFailed`]; a failed driver ignores all further
    /// `poll`/`tick` calls.
    pub fn setup(&mut self) -> Result<(), Clrc663Error> {
        info!("Setting up CLRC663...");

        for attempt in 0..Self::SETUP_ATTEMPTS {
            if self.reset_device().is_ok() {
                thread::sleep(Duration::from_millis(Self::RESET_SETTLE_MS));

                match self.read_firmware_version() {
                    Ok(version) => {
                        info!("Found CLRC663 version: 0x{:02X}", version);
                        return Ok(());
                    }
                    Err(e) => debug!("Version read failed: {}", e),
                }
            }

            if attempt < Self::SETUP_ATTEMPTS - 1 {
                warn!("Initialization attempt {} failed, retrying...", attempt + 1);
                thread::sleep(Duration::from_millis(Self::SETUP_RETRY_DELAY_MS));
            }
        }

        error!(
            "Failed to initialize CLRC663 after {} attempts",
            Self::SETUP_ATTEMPTS
        );
        self.failed = true;
        self.error_code = ErrorCode::WakeupFailed;
        Err(Clrc663Error::WakeupFailed)
    }

    /// Run one poll cycle at `now_ms` (a monotonic millisecond counter).
    ///
    /// Skipped entirely while the driver is failed, unhealthy, or inside a
    /// backoff window. A transport failure is never surfaced to the caller;
    /// it opens (or widens) the backoff window and the state machine keeps
    /// its last observation.
    pub fn poll(&mut self, now_ms: u64) {
        if self.failed {
            return;
        }

        if !self.health.healthy {
            warn!("Reader is unhealthy, skipping poll");
            return;
        }

        if self.backoff.is_blocked(now_ms) {
            return;
        }

        match self.read_passive_target_id() {
            Ok(uid) => {
                self.process_poll_result(uid);
                self.backoff.on_success();
            }
            Err(e) => {
                self.backoff.on_failure(now_ms);
                warn!(
                    "Read failed ({}), backing off for {} ms",
                    e,
                    self.backoff.delay_ms()
                );
            }
        }
    }

    /// Health-supervisor tick; call from every host loop iteration.
    ///
    /// Runs a check whenever the configured interval has elapsed since the
    /// last one, independent of the poll cadence and of any backoff window.
    pub fn tick(&mut self, now_ms: u64) {
        if self.failed {
            return;
        }

        if self.health.check_due(now_ms) {
            self.perform_health_check();
            self.health.last_check = now_ms;
        }
    }

    /// Log the configured health parameters and registered tags
    pub fn dump_config(&self) {
        info!("CLRC663:");
        if self.failed {
            info!("  Setup Failed!");
            return;
        }
        let config = &self.health.config;
        info!(
            "  Health Check: {}",
            if config.enabled { "enabled" } else { "disabled" }
        );
        if config.enabled {
            info!("  Health Check Interval: {} ms", config.interval_ms);
            info!("  Max Failed Checks: {}", config.max_failed_checks);
            info!(
                "  Auto Reset: {}",
                if config.auto_reset_on_failure {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
        for tag in &self.tags {
            info!("  Tag: {}", bytes_to_hex(tag.borrow().uid()));
        }
    }

    /// UID observed on the most recent successful poll; empty when no tag
    /// is present
    pub fn current_uid(&self) -> &[u8] {
        &self.current_uid
    }

    /// False once the health supervisor has given the reader up
    pub fn is_healthy(&self) -> bool {
        self.health.healthy
    }

    /// True once setup has exhausted its attempts; terminal
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Terminal error classification latched by setup
    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// Read the chip version byte from the version register
    pub fn read_firmware_version(&mut self) -> Result<u8, Clrc663Error> {
        self.write_data(&[REG_VERSION])?;

        let mut version = [0u8; 1];
        self.read_data(&mut version)?;
        Ok(version[0])
    }

    /// Scan for a single ISO14443A card and return its UID.
    ///
    /// Returns an empty vector when no card is in the field; that is a
    /// normal outcome, not an error. Only transport failures produce `Err`.
    ///
    /// The FIFO payload is truncated to its first 4 bytes; the trailing BCC
    /// checksum byte is discarded without validation. Cascade levels 2/3 are
    /// never issued, so only single-cascade (4-byte) UIDs resolve fully.
    pub fn read_passive_target_id(&mut self) -> Result<Vec<u8>, Clrc663Error> {
        // Load ISO14443A protocol from EEPROM
        self.write_data(&[REG_COMMAND, CMD_LOADPROTOCOL, 0x00])?;
        thread::sleep(Duration::from_millis(Self::PROTOCOL_SETTLE_MS));

        // Send REQA (request type A)
        self.write_data(&[REG_FIFO_DATA, ISO14443A_CMD_REQA])?;
        self.write_data(&[REG_COMMAND, CMD_TRANSCEIVE])?;
        thread::sleep(Duration::from_millis(Self::TRANSCEIVE_SETTLE_MS));

        // ATQA should be 2 bytes if a card answered
        if self.read_fifo_length()? < 2 {
            return Ok(Vec::new());
        }

        // Anti-collision cascade level 1
        self.write_data(&[REG_FIFO_DATA, ISO14443A_CMD_SELECT_CL1, 0x20])?;
        self.write_data(&[REG_COMMAND, CMD_TRANSCEIVE])?;
        thread::sleep(Duration::from_millis(Self::TRANSCEIVE_SETTLE_MS));

        let fifo_len = self.read_fifo_length()?;
        if fifo_len < 5 {
            return Ok(Vec::new());
        }

        self.write_data(&[REG_FIFO_DATA])?;
        let mut uid = vec![0u8; fifo_len as usize];
        self.read_data(&mut uid)?;

        // UID is the first 4 bytes, the 5th is the BCC checksum
        uid.truncate(4);
        Ok(uid)
    }

    /// Feed one successful scan result through the presence state machine
    fn process_poll_result(&mut self, uid: Vec<u8>) {
        if uid.is_empty() {
            // No tag present
            if !self.current_uid.is_empty() {
                // Tag was removed
                let uid_str = bytes_to_hex(&self.current_uid);
                debug!("Tag removed: {}", uid_str);
                for callback in &mut self.on_tag_removed_callbacks {
                    callback(&uid_str);
                }
                for tag in &self.tags {
                    tag.borrow_mut().on_scan_end();
                }
                self.current_uid.clear();
            }
        } else if uid != self.current_uid {
            // New or different tag
            self.current_uid = uid;
            let uid_str = bytes_to_hex(&self.current_uid);
            info!("Found new tag: {}", uid_str);
            for callback in &mut self.on_tag_callbacks {
                callback(&uid_str);
            }
            for tag in &self.tags {
                tag.borrow_mut().process(&self.current_uid);
            }
        }
    }

    fn perform_health_check(&mut self) {
        if self.verify_communication() {
            if self.health.record_success() {
                info!("Health check passed, resetting failure count");
            }
        } else {
            let unhealthy = self.health.record_failure();
            warn!(
                "Health check failed ({}/{})",
                self.health.failed_checks, self.health.config.max_failed_checks
            );
            if unhealthy {
                error!("Max health check failures reached, reader unhealthy");
                self.attempt_recovery();
            }
        }
    }

    fn verify_communication(&mut self) -> bool {
        self.read_firmware_version().is_ok()
    }

    fn attempt_recovery(&mut self) {
        if !self.health.config.auto_reset_on_failure {
            return;
        }

        info!("Attempting auto-reset...");
        if self.reset_device().is_ok() {
            thread::sleep(Duration::from_millis(Self::RESET_SETTLE_MS));
            if self.verify_communication() {
                info!("Auto-reset successful, reader recovered");
                self.health.record_success();
                return;
            }
        }
        error!("Auto-reset failed");
    }

    fn reset_device(&mut self) -> Result<(), Clrc663Error> {
        self.transport
            .reset_device()
            .map_err(|e| Clrc663Error::Transport(format!("{:?}", e)))
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Clrc663Error> {
        self.transport
            .write(data)
            .map_err(|e| Clrc663Error::Transport(format!("{:?}", e)))
    }

    fn read_data(&mut self, buf: &mut [u8]) -> Result<(), Clrc663Error> {
        self.transport
            .read(buf)
            .map_err(|e| Clrc663Error::Transport(format!("{:?}", e)))
    }

    fn read_fifo_length(&mut self) -> Result<u8, Clrc663Error> {
        self.write_data(&[REG_FIFO_LENGTH])?;

        let mut len = [0u8; 1];
        self.read_data(&mut len)?;
        Ok(len[0])
    }
}
