//! WiFi station bring-up.
//!
//! Blocking STA connect via `esp_idf_svc::wifi`.  The kit joins the
//! classroom access point once at boot; if the join fails the firmware
//! keeps running offline (counting and gate control do not depend on the
//! network), so the caller decides how hard to fail.

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

use crate::error::{CommsError, Error, Result};

/// Connect to the configured access point and wait for an IP.
pub fn connect_station(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    ssid: &str,
    password: &str,
) -> Result<BlockingWifi<EspWifi<'static>>> {
    let esp_wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))
        .map_err(|_| Error::from(CommsError::WifiConnectFailed))?;
    let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop)
        .map_err(|_| Error::from(CommsError::WifiConnectFailed))?;

    let auth_method = if password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };
    let client_config = ClientConfiguration {
        ssid: ssid
            .try_into()
            .map_err(|_| Error::Config("wifi_ssid too long (max 32 bytes)"))?,
        password: password
            .try_into()
            .map_err(|_| Error::Config("wifi_password too long (max 64 bytes)"))?,
        auth_method,
        ..Default::default()
    };
    wifi.set_configuration(&Configuration::Client(client_config))
        .map_err(|_| Error::from(CommsError::WifiConnectFailed))?;

    info!("WiFi: connecting to '{}'", ssid);
    wifi.start()
        .map_err(|_| Error::from(CommsError::WifiConnectFailed))?;
    wifi.connect()
        .map_err(|_| Error::from(CommsError::WifiConnectFailed))?;
    wifi.wait_netif_up()
        .map_err(|_| Error::from(CommsError::WifiConnectFailed))?;
    info!("WiFi: connected, netif up");

    Ok(wifi)
}
