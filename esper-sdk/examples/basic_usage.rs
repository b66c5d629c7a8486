//! Tour of the Esper SDK command surface
//!
//! Sends a raw OTA command, then walks through the convenience wrappers for
//! device, app, scheduled, group and settings commands. Each step prints its
//! outcome and a failure does not stop the tour.
//!
//! Run with:
//! ESPER_ENTERPRISE_ID=... ESPER_TOKEN=... cargo run -p esper-sdk --example basic_usage

use chrono::{Duration, Utc, Weekday};
use serde_json::{json, Map};

use esper_sdk::command::{parse_window_time, GpsState, RotationState, VolumeStream};
use esper_sdk::{ApiError, ApiResponse, EsperClient, SdkError};

const DEVICE_ID: &str = "d774ae8c-7466-42df-a472-6f04b39b8907";

fn report(label: &str, result: Result<ApiResponse, ApiError>) {
    match result {
        Ok(response) => println!("   {} (HTTP {})", label, response.status()),
        Err(e) => println!("   {} failed: {}", label, e),
    }
}

fn main() -> Result<(), SdkError> {
    esper_sdk::logging::init_logging_from_env().ok();

    println!("Esper SDK - Command Tour");
    println!("========================");

    let client = match EsperClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            println!("{}", e);
            println!("Set ESPER_ENTERPRISE_ID and ESPER_TOKEN (and optionally ESPER_TENANT)");
            return Ok(());
        }
    };
    println!("Using {} for enterprise {}", client.base_url(), client.enterprise_id());

    let commands = client.commands();
    let devices = [DEVICE_ID];

    println!("\nRaw OTA update command:");
    let ota = json!({
        "command_type": "DEVICE",
        "command": "UPDATE_DEVICE_CONFIG",
        "command_args": {
            "custom_settings_config": {
                "scripts": [{
                    "action": "LAUNCH",
                    "launchType": "SERVICE",
                    "actionParams": {
                        "componentName": "io.esper.otamanager/io.esper.otamanager.OTAUpdateService",
                        "intentAction": "io.esper.otamanager.INSTALL_OTA",
                        "serviceType": "BACKGROUND",
                        "extras": {
                            "otaType": "SEAMLESS",
                            "metaData": "{\"ab_install_type\":\"STREAMING\"}"
                        }
                    }
                }]
            }
        },
        "devices": devices,
        "device_type": "all"
    });
    match commands.send_raw_command(&ota) {
        Ok(response) => println!("   Command sent:\n{}", response.pretty_string()),
        Err(e) => println!("   Error sending command: {}", e),
    }

    println!("\nConvenience methods:");
    report("Reboot", commands.reboot(devices));
    report("Brightness set to 70%", commands.set_brightness(devices, 70));
    report(
        "Notification",
        commands.notify_device(
            devices,
            "Test Notification",
            "This is a test message",
            Some("https://example.com"),
        ),
    );

    println!("\nCustom device config:");
    let mut config = Map::new();
    config.insert(
        "custom_settings_config".to_string(),
        json!({
            "display_settings": { "brightness": 80, "timeout": 30000 },
            "audio_settings": { "volume": 70 }
        }),
    );
    report("Device config updated", commands.update_device_config(devices, config));

    println!("\nApp management:");
    report("App installation", commands.install_app(devices, "app-version-id-12345"));
    report("Kiosk app", commands.set_kiosk_app(devices, "com.example.kiosk"));

    println!("\nScheduled commands:");
    let now = Utc::now();
    let window = parse_window_time("02:00")
        .and_then(|start| parse_window_time("04:00").map(|end| (start, end)));
    match window {
        Ok((start, end)) => report(
            "Reboot in maintenance window",
            commands.schedule_reboot_window(
                devices,
                now + Duration::hours(1),
                now + Duration::hours(3),
                start,
                end,
            ),
        ),
        Err(e) => println!("   Bad window: {}", e),
    }
    report(
        "Recurring notification",
        commands.schedule_recurring_notification(
            devices,
            "Daily Reminder",
            "Check-in Reminder",
            "Please complete your daily check-in",
            now,
            now + Duration::days(30),
            [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
        ),
    );

    println!("\nGroup commands:");
    let groups = ["production-devices", "warehouse-tablets"];
    report(
        "Policy applied to groups",
        commands.apply_policy_to_groups(groups, "https://example.com/policies/production-policy.json"),
    );
    report("Group reboot", commands.reboot_groups(groups));

    println!("\nAdvanced device settings:");
    report("GPS high accuracy", commands.set_gps_state(devices, GpsState::HighAccuracy));
    report("Portrait only", commands.set_rotation_state(devices, RotationState::PortraitOnly));
    report("Music volume 50%", commands.set_volume(devices, VolumeStream::Music, 50));
    report("Bluetooth on", commands.set_bluetooth_state(devices, true));
    report("Language en_US", commands.set_device_language(devices, "en_US"));
    report(
        "Lockdown",
        commands.set_device_lockdown(devices, true, "Device under maintenance"),
    );
    report("Screenshot", commands.capture_screenshot(devices, Some("audit-screenshot-2024")));
    report("Beep", commands.beep_device(devices, "3"));

    Ok(())
}
