//! The closed set of values a command envelope can carry

use super::macros::wire_enum;

wire_enum! {
    /// Remote command understood by the Esper agent
    pub enum Command: "command" {
        AddToWhitelist => "ADD_TO_WHITELIST",
        AddWifiAp => "ADD_WIFI_AP",
        ClearAppData => "CLEAR_APP_DATA",
        Install => "INSTALL",
        Lock => "LOCK",
        Reboot => "REBOOT",
        RemoveFromWhitelist => "REMOVE_FROM_WHITELIST",
        RemoveWifiAp => "REMOVE_WIFI_AP",
        SetAppPermission => "SET_APP_PERMISSION",
        SetAppState => "SET_APP_STATE",
        SetBluetoothState => "SET_BLUETOOTH_STATE",
        SetBrightnessScale => "SET_BRIGHTNESS_SCALE",
        SetDeviceLockdownState => "SET_DEVICE_LOCKDOWN_STATE",
        SetGpsState => "SET_GPS_STATE",
        SetKioskApp => "SET_KIOSK_APP",
        /// Push a managed-configuration policy by URL
        SetNewPolicy => "SET_NEW_POLICY",
        SetRotationState => "SET_ROTATION_STATE",
        SetScreenOffTimeout => "SET_SCREEN_OFF_TIMEOUT",
        SetStreamVolume => "SET_STREAM_VOLUME",
        SetTimezone => "SET_TIMEZONE",
        SetWifiState => "SET_WIFI_STATE",
        Uninstall => "UNINSTALL",
        UpdateDeviceConfig => "UPDATE_DEVICE_CONFIG",
        UpdateHeartbeat => "UPDATE_HEARTBEAT",
        UpdateLatestDpc => "UPDATE_LATEST_DPC",
        Wipe => "WIPE",
        ResetLockscreenPassword => "RESET_LOCKSCREEN_PASSWORD",
        CaptureScreenshot => "CAPTURE_SCREENSHOT",
        /// Push or reapply the current Blueprint
        UpdateBlueprint => "UPDATE_BLUEPRINT",
        NotifyDevice => "NOTIFY_DEVICE",
        SetDeviceLanguage => "SET_DEVICE_LANGUAGE",
        SetEthernetSettings => "SET_ETHERNET_SETTINGS",
        SetStaticIp => "SET_STATIC_IP",
        BeepDevice => "BEEP_DEVICE",
        SetAppNotifications => "SET_APP_NOTIFICATIONS",
        UseOnlySavedWifiAp => "USE_ONLY_SAVED_WIFI_AP",
        Converge => "CONVERGE",
    }
}

wire_enum! {
    /// What the `devices`/`groups` list of an envelope refers to
    pub enum CommandType: "command_type" {
        /// Specific devices
        Device => "DEVICE",
        /// Every device currently in the groups
        Group => "GROUP",
        /// Devices in the groups now and any that join later
        Dynamic => "DYNAMIC",
    }
}

wire_enum! {
    /// When the command executes
    pub enum Schedule: "schedule" {
        Immediate => "IMMEDIATE",
        /// Once, inside a daily time window between two dates
        Window => "WINDOW",
        /// Repeatedly on the given days between two dates
        Recurring => "RECURRING",
    }
}

wire_enum! {
    /// Which devices of a target set receive the command
    pub enum DeviceType: "device_type" {
        All => "all",
        Active => "active",
        Inactive => "inactive",
    }
}

wire_enum! {
    /// Visibility of an installed app
    pub enum AppState: "app_state" {
        Show => "SHOW",
        Hide => "HIDE",
        Disable => "DISABLE",
    }
}

wire_enum! {
    pub enum LockdownState: "state" {
        Locked => "LOCKED",
        Unlocked => "UNLOCKED",
    }
}

wire_enum! {
    /// Whether schedule times are read in the console's or the device's timezone
    pub enum TimeType: "time_type" {
        Console => "console",
        Device => "device",
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Immediate
    }
}

impl Default for TimeType {
    fn default() -> Self {
        TimeType::Console
    }
}

impl From<bool> for LockdownState {
    fn from(locked: bool) -> Self {
        if locked {
            LockdownState::Locked
        } else {
            LockdownState::Unlocked
        }
    }
}
