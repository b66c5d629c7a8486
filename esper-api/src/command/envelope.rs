//! Command envelopes and the fluent builder that produces them
//!
//! An envelope is the JSON body posted to the command endpoint. Targets are a
//! single [`CommandTarget`] value, so an envelope always carries exactly one of
//! `devices`/`groups` and a `command_type` that agrees with it.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::catalog::{Command, CommandType, DeviceType, Schedule};
use super::schedule::ScheduleArgs;
use super::validation::ValidationError;

/// Who receives a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTarget {
    /// Specific devices, by id
    Devices(Vec<String>),
    /// Devices currently in the groups, by group id
    Groups(Vec<String>),
    /// Devices in the groups now and any that join later
    Dynamic(Vec<String>),
}

impl CommandTarget {
    pub fn devices(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        CommandTarget::Devices(ids.into_iter().map(Into::into).collect())
    }

    pub fn groups(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        CommandTarget::Groups(ids.into_iter().map(Into::into).collect())
    }

    pub fn dynamic(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        CommandTarget::Dynamic(ids.into_iter().map(Into::into).collect())
    }

    pub fn command_type(&self) -> CommandType {
        match self {
            CommandTarget::Devices(_) => CommandType::Device,
            CommandTarget::Groups(_) => CommandType::Group,
            CommandTarget::Dynamic(_) => CommandType::Dynamic,
        }
    }

    pub fn ids(&self) -> &[String] {
        match self {
            CommandTarget::Devices(ids) | CommandTarget::Groups(ids) | CommandTarget::Dynamic(ids) => ids,
        }
    }

    /// Envelope key holding the ids
    pub fn field(&self) -> &'static str {
        match self {
            CommandTarget::Devices(_) => "devices",
            CommandTarget::Groups(_) | CommandTarget::Dynamic(_) => "groups",
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let field = self.field();
        if self.ids().is_empty() {
            return Err(ValidationError::missing(field));
        }
        if let Some(blank) = self.ids().iter().find(|id| id.trim().is_empty()) {
            return Err(ValidationError::invalid_value(field, format!("{:?}", blank), "ids must not be blank"));
        }
        Ok(())
    }
}

/// A validated command request body
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEnvelope {
    command: Command,
    target: CommandTarget,
    command_args: Option<Map<String, Value>>,
    schedule: Schedule,
    schedule_args: Option<ScheduleArgs>,
    device_type: Option<DeviceType>,
}

impl CommandEnvelope {
    /// Start building an envelope for `command`
    pub fn builder(command: Command) -> CommandBuilder {
        CommandBuilder::new(command)
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn command_type(&self) -> CommandType {
        self.target.command_type()
    }

    pub fn target(&self) -> &CommandTarget {
        &self.target
    }

    pub fn command_args(&self) -> Option<&Map<String, Value>> {
        self.command_args.as_ref()
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn schedule_args(&self) -> Option<&ScheduleArgs> {
        self.schedule_args.as_ref()
    }

    pub fn device_type(&self) -> Option<DeviceType> {
        self.device_type
    }

    /// The JSON body as sent on the wire
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for CommandEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("command_type", &self.target.command_type())?;
        map.serialize_entry(self.target.field(), self.target.ids())?;
        map.serialize_entry("command", &self.command)?;
        if let Some(args) = &self.command_args {
            map.serialize_entry("command_args", args)?;
        }
        map.serialize_entry("schedule", &self.schedule)?;
        if let Some(args) = &self.schedule_args {
            map.serialize_entry("schedule_args", args)?;
        }
        if let Some(device_type) = &self.device_type {
            map.serialize_entry("device_type", device_type)?;
        }
        map.end()
    }
}

/// Fluent builder for [`CommandEnvelope`]
///
/// # Example
/// ```rust
/// use esper_api::command::{Command, CommandEnvelope};
///
/// let envelope = CommandEnvelope::builder(Command::SetKioskApp)
///     .devices(["d774ae8c-7466-42df-a472-6f04b39b8907"])
///     .arg("package_name", "com.example.kiosk")
///     .build()
///     .unwrap();
///
/// assert_eq!(envelope.to_json()["command"], "SET_KIOSK_APP");
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    command: Command,
    target: Option<CommandTarget>,
    command_args: Option<Map<String, Value>>,
    schedule: Schedule,
    schedule_args: Option<ScheduleArgs>,
    device_type: Option<DeviceType>,
}

impl CommandBuilder {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            target: None,
            command_args: None,
            schedule: Schedule::default(),
            schedule_args: None,
            device_type: None,
        }
    }

    pub fn target(mut self, target: CommandTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn devices(self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.target(CommandTarget::devices(ids))
    }

    pub fn groups(self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.target(CommandTarget::groups(ids))
    }

    pub fn dynamic(self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.target(CommandTarget::dynamic(ids))
    }

    /// Set one `command_args` entry
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.command_args
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Merge `args` into `command_args`, creating it even when `args` is empty
    pub fn args(mut self, args: Map<String, Value>) -> Self {
        self.command_args.get_or_insert_with(Map::new).extend(args);
        self
    }

    pub fn schedule(mut self, schedule: Schedule, args: Option<ScheduleArgs>) -> Self {
        self.schedule = schedule;
        self.schedule_args = args;
        self
    }

    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    /// Validate and produce the envelope
    pub fn build(self) -> Result<CommandEnvelope, ValidationError> {
        let target = self.target.ok_or_else(|| ValidationError::missing("devices"))?;
        target.validate()?;

        match (&self.schedule, &self.schedule_args) {
            (Schedule::Immediate, None) => {}
            (schedule, Some(args)) => args.validate_for(*schedule)?,
            (_, None) => return Err(ValidationError::missing("schedule_args")),
        }

        Ok(CommandEnvelope {
            command: self.command,
            target,
            command_args: self.command_args,
            schedule: self.schedule,
            schedule_args: self.schedule_args,
            device_type: self.device_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::schedule::parse_window_time;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_device_envelope_wire_format() {
        let envelope = CommandEnvelope::builder(Command::Reboot)
            .devices(["d1", "d2"])
            .build()
            .unwrap();

        assert_eq!(
            envelope.to_json(),
            json!({
                "command_type": "DEVICE",
                "devices": ["d1", "d2"],
                "command": "REBOOT",
                "schedule": "IMMEDIATE"
            })
        );
        assert_eq!(envelope.command_type(), CommandType::Device);
    }

    #[test]
    fn test_group_and_dynamic_targets_use_groups_key() {
        let group = CommandEnvelope::builder(Command::Lock)
            .groups(vec!["g1".to_string()])
            .build()
            .unwrap()
            .to_json();
        assert_eq!(group["command_type"], "GROUP");
        assert_eq!(group["groups"], json!(["g1"]));
        assert!(group.get("devices").is_none());

        let dynamic = CommandEnvelope::builder(Command::Install)
            .dynamic(["g2"])
            .arg("app_version", "v-1")
            .build()
            .unwrap()
            .to_json();
        assert_eq!(dynamic["command_type"], "DYNAMIC");
        assert_eq!(dynamic["groups"], json!(["g2"]));
        assert!(dynamic.get("devices").is_none());
    }

    #[test]
    fn test_args_and_device_type() {
        let mut config = Map::new();
        config.insert("custom_settings_config".into(), json!({"scripts": []}));

        let envelope = CommandEnvelope::builder(Command::UpdateDeviceConfig)
            .devices(["d1"])
            .args(config)
            .device_type(DeviceType::All)
            .build()
            .unwrap()
            .to_json();

        assert_eq!(envelope["command_args"], json!({"custom_settings_config": {"scripts": []}}));
        assert_eq!(envelope["device_type"], "all");
    }

    #[test]
    fn test_empty_args_are_still_sent() {
        let envelope = CommandEnvelope::builder(Command::CaptureScreenshot)
            .devices(["d1"])
            .args(Map::new())
            .build()
            .unwrap()
            .to_json();
        assert_eq!(envelope["command_args"], json!({}));
    }

    #[test]
    fn test_missing_or_empty_target_is_rejected() {
        assert_eq!(
            CommandEnvelope::builder(Command::Wipe).build(),
            Err(ValidationError::missing("devices"))
        );
        assert_eq!(
            CommandEnvelope::builder(Command::Wipe).devices(Vec::<String>::new()).build(),
            Err(ValidationError::missing("devices"))
        );
        assert_eq!(
            CommandEnvelope::builder(Command::Wipe).groups(Vec::<String>::new()).build(),
            Err(ValidationError::missing("groups"))
        );
        assert!(CommandEnvelope::builder(Command::Wipe).devices(["d1", " "]).build().is_err());
    }

    #[test]
    fn test_schedule_requires_matching_args() {
        let missing = CommandEnvelope::builder(Command::Reboot)
            .devices(["d1"])
            .schedule(Schedule::Window, None)
            .build();
        assert_eq!(missing, Err(ValidationError::missing("schedule_args")));

        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        let args = ScheduleArgs::window(
            start,
            end,
            parse_window_time("02:00").unwrap(),
            parse_window_time("04:00").unwrap(),
        );

        let envelope = CommandEnvelope::builder(Command::Reboot)
            .devices(["d1"])
            .schedule(Schedule::Window, Some(args.clone()))
            .build()
            .unwrap();
        assert_eq!(envelope.schedule(), Schedule::Window);
        assert_eq!(envelope.to_json()["schedule_args"]["window_end_time"], "04:00");

        let immediate_with_args = CommandEnvelope::builder(Command::Reboot)
            .devices(["d1"])
            .schedule(Schedule::Immediate, Some(args))
            .build();
        assert!(immediate_with_args.is_err());
    }

    #[test]
    fn test_arg_overwrites_same_key() {
        let envelope = CommandEnvelope::builder(Command::SetTimezone)
            .devices(["d1"])
            .arg("timezone_string", "UTC")
            .arg("timezone_string", "Asia/Kolkata")
            .build()
            .unwrap();
        assert_eq!(
            envelope.command_args().unwrap().get("timezone_string"),
            Some(&json!("Asia/Kolkata"))
        );
    }
}
