//! Remote command dispatch
//!
//! Every convenience method validates its arguments, builds a
//! [`CommandEnvelope`] and hands it to [`Commands::send_command`]. Invalid
//! arguments fail with [`ApiError::InvalidParameter`](crate::ApiError::InvalidParameter)
//! before any request is made.

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use esper_transport::{ApiResponse, Transport};
use serde_json::{Map, Value};

use crate::command::{
    ensure_not_blank, AppState, Brightness, Command, CommandBuilder, CommandEnvelope, DeviceType,
    GpsState, LockdownState, RotationState, Schedule, ScheduleArgs, ScreenOffTimeout, VolumeLevel,
    VolumeStream,
};
use crate::endpoint::Endpoint;
use crate::Result;

/// Commands resource client
#[derive(Debug, Clone)]
pub struct Commands {
    transport: Arc<Transport>,
}

impl Commands {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Send a validated envelope to the command endpoint
    pub fn send_command(&self, envelope: &CommandEnvelope) -> Result<ApiResponse> {
        tracing::debug!(
            command = %envelope.command(),
            command_type = %envelope.command_type(),
            targets = envelope.target().ids().len(),
            schedule = %envelope.schedule(),
            "dispatching command"
        );
        self.post(envelope)
    }

    /// Send an arbitrary JSON body to the command endpoint
    ///
    /// Escape hatch for command shapes the typed API does not cover. The body
    /// is sent as-is, without validation.
    pub fn send_raw_command(&self, body: &Value) -> Result<ApiResponse> {
        tracing::debug!("dispatching raw command");
        self.post(body)
    }

    /// Send `command` to every device in `groups`
    pub fn send_group_command(
        &self,
        groups: impl IntoIterator<Item = impl Into<String>>,
        command: Command,
        args: Option<Map<String, Value>>,
    ) -> Result<ApiResponse> {
        let mut builder = CommandEnvelope::builder(command).groups(groups);
        if let Some(args) = args {
            builder = builder.args(args);
        }
        self.send_command(&builder.build()?)
    }

    /// Apply `schedule` to a partly built envelope and send it
    pub fn send_scheduled_command(
        &self,
        builder: CommandBuilder,
        schedule: Schedule,
        schedule_args: Option<ScheduleArgs>,
    ) -> Result<ApiResponse> {
        let envelope = builder.schedule(schedule, schedule_args).build()?;
        self.send_command(&envelope)
    }

    fn post<B: serde::Serialize + ?Sized>(&self, body: &B) -> Result<ApiResponse> {
        let endpoint = Endpoint::Commands.path(self.transport.enterprise_id());
        Ok(self.transport.post(&endpoint, body)?)
    }

    fn send_to_devices(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        command: Command,
        configure: impl FnOnce(CommandBuilder) -> CommandBuilder,
    ) -> Result<ApiResponse> {
        let builder = configure(CommandEnvelope::builder(command).devices(devices));
        self.send_command(&builder.build()?)
    }

    // Device lifecycle

    pub fn reboot(&self, devices: impl IntoIterator<Item = impl Into<String>>) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::Reboot, |b| b)
    }

    pub fn lock(&self, devices: impl IntoIterator<Item = impl Into<String>>) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::Lock, |b| b)
    }

    /// Factory-reset the devices
    pub fn wipe(&self, devices: impl IntoIterator<Item = impl Into<String>>) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::Wipe, |b| b)
    }

    /// Push or reapply the current Blueprint
    pub fn update_blueprint(&self, devices: impl IntoIterator<Item = impl Into<String>>) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::UpdateBlueprint, |b| b)
    }

    // App management

    pub fn install_app(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        app_version_id: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("app_version", app_version_id)?;
        self.send_to_devices(devices, Command::Install, |b| b.arg("app_version", app_version_id))
    }

    pub fn uninstall_app(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        package_name: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("package_name", package_name)?;
        self.send_to_devices(devices, Command::Uninstall, |b| b.arg("package_name", package_name))
    }

    pub fn clear_app_data(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        package_name: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("package_name", package_name)?;
        self.send_to_devices(devices, Command::ClearAppData, |b| b.arg("package_name", package_name))
    }

    pub fn set_kiosk_app(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        package_name: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("package_name", package_name)?;
        self.send_to_devices(devices, Command::SetKioskApp, |b| b.arg("package_name", package_name))
    }

    pub fn set_app_state(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        package_name: &str,
        state: AppState,
    ) -> Result<ApiResponse> {
        ensure_not_blank("package_name", package_name)?;
        self.send_to_devices(devices, Command::SetAppState, |b| {
            b.arg("package_name", package_name).arg("app_state", state.as_str())
        })
    }

    // Display and audio

    /// Set screen brightness, 1-100
    pub fn set_brightness(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        brightness: impl Into<i64>,
    ) -> Result<ApiResponse> {
        let brightness = Brightness::try_from(brightness.into())?;
        self.send_to_devices(devices, Command::SetBrightnessScale, |b| {
            b.arg("brightness_value", brightness.value())
        })
    }

    /// Set the volume of one audio stream
    ///
    /// `stream` accepts a [`VolumeStream`] or its raw code (0=Ring,
    /// 1=Notification, 2=Alarm, 3=Music); `level` is 0-100.
    pub fn set_volume(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        stream: impl Into<i64>,
        level: impl Into<i64>,
    ) -> Result<ApiResponse> {
        let stream = VolumeStream::try_from(stream.into())?;
        let level = VolumeLevel::try_from(level.into())?;
        self.send_to_devices(devices, Command::SetStreamVolume, |b| {
            b.arg("stream", stream.code()).arg("volume_level", level.value())
        })
    }

    /// `state` accepts a [`RotationState`] or its raw code (0=Auto, 1=Portrait, 2=Landscape)
    pub fn set_rotation_state(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        state: impl Into<i64>,
    ) -> Result<ApiResponse> {
        let state = RotationState::try_from(state.into())?;
        self.send_to_devices(devices, Command::SetRotationState, |b| b.arg("rotate_state", state.code()))
    }

    /// `timeout_ms` is `-1` (never) or 5 000 - 1 800 000
    pub fn set_screen_off_timeout(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        timeout_ms: i64,
    ) -> Result<ApiResponse> {
        let timeout = ScreenOffTimeout::new(timeout_ms)?;
        self.send_to_devices(devices, Command::SetScreenOffTimeout, |b| {
            b.arg("screen_off_timeout", timeout.as_wire())
        })
    }

    pub fn capture_screenshot(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        tag: Option<&str>,
    ) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::CaptureScreenshot, |b| {
            let b = b.args(Map::new());
            match tag {
                Some(tag) => b.arg("tag", tag),
                None => b,
            }
        })
    }

    // Connectivity and location

    pub fn set_wifi_state(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        enabled: bool,
    ) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::SetWifiState, |b| b.arg("wifi_state", enabled))
    }

    pub fn set_bluetooth_state(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        enabled: bool,
    ) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::SetBluetoothState, |b| b.arg("bluetooth_state", enabled))
    }

    /// `state` accepts a [`GpsState`] or its raw code (0-4)
    pub fn set_gps_state(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        state: impl Into<i64>,
    ) -> Result<ApiResponse> {
        let state = GpsState::try_from(state.into())?;
        self.send_to_devices(devices, Command::SetGpsState, |b| b.arg("gps_state", state.code()))
    }

    // Device settings

    /// Send a free-form `UPDATE_DEVICE_CONFIG` payload
    ///
    /// `device_type` defaults to `all` unless the config sets it.
    pub fn update_device_config(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        config: Map<String, Value>,
    ) -> Result<ApiResponse> {
        let has_device_type = config.contains_key("device_type");
        self.send_to_devices(devices, Command::UpdateDeviceConfig, |b| {
            let b = b.args(config);
            if has_device_type {
                b
            } else {
                b.device_type(DeviceType::All)
            }
        })
    }

    pub fn set_device_language(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        locale: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("locale", locale)?;
        self.send_to_devices(devices, Command::SetDeviceLanguage, |b| b.arg("locale", locale))
    }

    /// `timezone` is an IANA name such as `Asia/Kolkata`
    pub fn set_timezone(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        timezone: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("timezone_string", timezone)?;
        self.send_to_devices(devices, Command::SetTimezone, |b| b.arg("timezone_string", timezone))
    }

    pub fn reset_password(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        new_password: &str,
    ) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::ResetLockscreenPassword, |b| {
            b.arg("new_lockscreen_password", new_password)
        })
    }

    pub fn apply_policy(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        policy_url: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("policy_url", policy_url)?;
        self.send_to_devices(devices, Command::SetNewPolicy, |b| b.arg("policy_url", policy_url))
    }

    /// Lock or unlock devices, showing `message` on the lock screen
    pub fn set_device_lockdown(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        locked: bool,
        message: &str,
    ) -> Result<ApiResponse> {
        let state = LockdownState::from(locked);
        self.send_to_devices(devices, Command::SetDeviceLockdownState, |b| {
            b.arg("state", state.as_str()).arg("message", message)
        })
    }

    // Notifications

    pub fn notify_device(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        title: &str,
        message: &str,
        url: Option<&str>,
    ) -> Result<ApiResponse> {
        self.send_to_devices(devices, Command::NotifyDevice, |b| {
            let b = b.arg("title", title).arg("message", message);
            match url {
                Some(url) => b.arg("url", url),
                None => b,
            }
        })
    }

    /// Make the devices beep; `duration` is passed through as the API expects it
    pub fn beep_device(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        duration: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("duration", duration)?;
        self.send_to_devices(devices, Command::BeepDevice, |b| b.arg("duration", duration))
    }

    // Group commands

    pub fn reboot_groups(&self, groups: impl IntoIterator<Item = impl Into<String>>) -> Result<ApiResponse> {
        self.send_group_command(groups, Command::Reboot, None)
    }

    pub fn lock_groups(&self, groups: impl IntoIterator<Item = impl Into<String>>) -> Result<ApiResponse> {
        self.send_group_command(groups, Command::Lock, None)
    }

    pub fn apply_policy_to_groups(
        &self,
        groups: impl IntoIterator<Item = impl Into<String>>,
        policy_url: &str,
    ) -> Result<ApiResponse> {
        ensure_not_blank("policy_url", policy_url)?;
        let mut args = Map::new();
        args.insert("policy_url".to_string(), Value::from(policy_url));
        self.send_group_command(groups, Command::SetNewPolicy, Some(args))
    }

    // Scheduled commands

    /// Reboot once between `start` and `end`, inside the daily window
    pub fn schedule_reboot_window(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window_start: NaiveTime,
        window_end: NaiveTime,
    ) -> Result<ApiResponse> {
        let builder = CommandEnvelope::builder(Command::Reboot).devices(devices);
        let args = ScheduleArgs::window(start, end, window_start, window_end);
        self.send_scheduled_command(builder, Schedule::Window, Some(args))
    }

    /// Send a notification on each of `days` between `start` and `end`
    #[allow(clippy::too_many_arguments)]
    pub fn schedule_recurring_notification(
        &self,
        devices: impl IntoIterator<Item = impl Into<String>>,
        name: &str,
        title: &str,
        message: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        days: impl IntoIterator<Item = Weekday>,
    ) -> Result<ApiResponse> {
        let builder = CommandEnvelope::builder(Command::NotifyDevice)
            .devices(devices)
            .arg("title", title)
            .arg("message", message);
        let args = ScheduleArgs::recurring(name, start, end, days);
        self.send_scheduled_command(builder, Schedule::Recurring, Some(args))
    }
}
