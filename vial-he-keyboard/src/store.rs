//! Per-key analog configuration cache and staged edits

use std::collections::HashMap;

use tracing::{debug, info, warn};
use vial_he_transport::command::{
    GetKeyConfig, GetLutConfig, KeyConfigResponse, LutConfigResponse, SetKeyConfig, SetLutConfig,
};
use vial_he_transport::protocol::timing;
use vial_he_transport::{AnalogConfig, BoxedTransport, LutChannelConfig, TransportExt};

use crate::analog::{AnalogField, FillPolicy, PendingConfig, SetPendingField};
use crate::error::KeyboardError;
use crate::lut::{LutChannel, LutField, PendingLut};
use crate::target::SelectionTarget;

/// Analog configuration of the selected key plus values staged for commit
///
/// Only the most recently fetched key is cached. Staged values are shared by
/// every key: they are what the option fields currently hold, independent of
/// which key is selected.
pub struct KeyConfigStore {
    transport: BoxedTransport,
    retries: u32,
    fill_policy: FillPolicy,
    lut_commands: bool,
    cached: Option<((u8, u8), AnalogConfig)>,
    pending: PendingConfig,
    dirty: bool,
    lut_cached: HashMap<LutChannel, LutChannelConfig>,
    lut_pending: HashMap<LutChannel, PendingLut>,
}

impl KeyConfigStore {
    pub fn new(transport: BoxedTransport) -> Self {
        Self {
            transport,
            retries: timing::DEFAULT_RETRIES,
            fill_policy: FillPolicy::default(),
            lut_commands: false,
            cached: None,
            pending: PendingConfig::default(),
            dirty: false,
            lut_cached: HashMap::new(),
            lut_pending: HashMap::new(),
        }
    }

    /// Set the transport retry budget (default 20)
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_fill_policy(mut self, policy: FillPolicy) -> Self {
        self.fill_policy = policy;
        self
    }

    /// Allow LUT sub-commands to reach the device
    pub fn with_lut_commands(mut self, enabled: bool) -> Self {
        self.lut_commands = enabled;
        self
    }

    // === Per-key config ===

    /// Fetch a key's configuration and make it the cached one
    ///
    /// On failure the previous cache is kept.
    pub fn select(&mut self, row: u8, col: u8) -> Result<AnalogConfig, KeyboardError> {
        let resp: KeyConfigResponse = self
            .transport
            .query(&GetKeyConfig { row, col }, self.retries)?;
        debug!("Key ({}, {}) config: {:?}", row, col, resp.config);
        self.cached = Some(((row, col), resp.config));
        Ok(resp.config)
    }

    /// Stage a single option value
    pub fn set_pending(&mut self, field: AnalogField, value: u8) {
        self.pending.stage(field, value);
        self.dirty = true;
    }

    /// Command-object form of [`KeyConfigStore::set_pending`]
    pub fn apply(&mut self, cmd: SetPendingField) {
        self.set_pending(cmd.field, cmd.value);
    }

    /// Stage every field from `config`
    pub fn stage_from(&mut self, config: &AnalogConfig) {
        self.pending.stage_all(config);
        self.dirty = true;
    }

    pub fn pending(&self) -> &PendingConfig {
        &self.pending
    }

    /// Whether staged values changed since the last successful commit
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last fetched coordinate and config
    pub fn cached(&self) -> Option<((u8, u8), AnalogConfig)> {
        self.cached
    }

    /// Config a commit to `(row, col)` would write right now
    ///
    /// Only a cache entry for the same coordinate counts as fetched.
    pub fn resolved(&self, row: u8, col: u8) -> AnalogConfig {
        let fetched = self
            .cached
            .as_ref()
            .filter(|(pos, _)| *pos == (row, col))
            .map(|(_, cfg)| cfg);
        self.pending.resolve(self.fill_policy, fetched)
    }

    /// Write staged values to `target`
    ///
    /// Encoders have no analog config: nothing is sent and `Ok(None)` is
    /// returned. Staged values are kept whether or not the write succeeds.
    pub fn commit(
        &mut self,
        target: &SelectionTarget,
    ) -> Result<Option<AnalogConfig>, KeyboardError> {
        let Some((row, col)) = target.coordinate() else {
            debug!("Commit skipped for {}", target);
            return Ok(None);
        };

        let config = self.resolved(row, col);
        self.transport
            .execute(&SetKeyConfig { row, col, config }, self.retries)?;
        info!(
            "Wrote key ({}, {}): mode={} actuation={} deadzone={} up={} down={}",
            row,
            col,
            config.mode,
            config.actuation_point,
            config.deadzone,
            config.up_sensitivity,
            config.down_sensitivity
        );
        self.dirty = false;
        Ok(Some(config))
    }

    // === LUT channels ===

    fn ensure_lut(&self) -> Result<(), KeyboardError> {
        if self.lut_commands {
            Ok(())
        } else {
            warn!("LUT commands are disabled");
            Err(KeyboardError::NotSupported(
                "LUT commands are disabled (set lut_commands = true)".into(),
            ))
        }
    }

    /// Fetch one LUT channel
    pub fn fetch_lut(&mut self, channel: LutChannel) -> Result<LutChannelConfig, KeyboardError> {
        self.ensure_lut()?;
        let resp: LutConfigResponse = self.transport.query(
            &GetLutConfig {
                channel: channel.id(),
            },
            self.retries,
        )?;
        debug!("{} LUT: {:?}", channel, resp.config);
        self.lut_cached.insert(channel, resp.config);
        Ok(resp.config)
    }

    /// Stage one LUT parameter
    pub fn set_pending_lut(
        &mut self,
        channel: LutChannel,
        field: LutField,
        value: f64,
    ) -> Result<(), KeyboardError> {
        let value = field
            .validate(value)
            .map_err(KeyboardError::InvalidParameter)?;
        self.lut_pending
            .entry(channel)
            .or_default()
            .stage(field, value);
        Ok(())
    }

    /// Write staged LUT parameters for `channel`
    ///
    /// Unstaged parameters keep the last fetched values (zero if the channel
    /// was never fetched). Staged values are dropped after a successful write.
    pub fn commit_lut(&mut self, channel: LutChannel) -> Result<LutChannelConfig, KeyboardError> {
        self.ensure_lut()?;
        let base = self.lut_cached.get(&channel).copied().unwrap_or_default();
        let config = self
            .lut_pending
            .get(&channel)
            .map(|p| p.resolve(&base))
            .unwrap_or(base);

        self.transport.execute(
            &SetLutConfig {
                channel: channel.id(),
                config,
            },
            self.retries,
        )?;
        info!("Wrote {} LUT", channel);
        self.lut_pending.remove(&channel);
        self.lut_cached.insert(channel, config);
        Ok(config)
    }
}
