//! USB bus printer transport
//!
//! Finds the printer by vendor/product id, widening to any device that
//! reports the USB printer class or the configured vendor. Talks bulk OUT
//! on interface 0 through libusb (`rusb`, feature `usb`).

use crate::error::{PrintError, PrintResult};
use crate::transport::{ConnectionKind, Transport};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, instrument};

/// Rugtek vendor id
pub const DEFAULT_VENDOR_ID: u16 = 0x0FE6;
/// Rugtek RP326 product id
pub const DEFAULT_PRODUCT_ID: u16 = 0x811E;
/// bDeviceClass for printers
pub const PRINTER_CLASS: u8 = 0x07;

/// Interface carrying the print data endpoint
#[cfg(feature = "usb")]
const PRINTER_INTERFACE: u8 = 0;

/// Identity fields read from a device descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
    pub class_code: u8,
}

/// Pick the printer among enumerated devices
///
/// An exact vendor/product match wins. Otherwise the first device that
/// reports the printer class or the configured vendor is used, which may
/// pick an unrelated printer when several are attached.
pub fn select_device(devices: &[DeviceIdentity], vendor_id: u16, product_id: u16) -> Option<usize> {
    devices
        .iter()
        .position(|d| d.vendor_id == vendor_id && d.product_id == product_id)
        .or_else(|| {
            devices
                .iter()
                .position(|d| d.class_code == PRINTER_CLASS || d.vendor_id == vendor_id)
        })
}

/// USB printer transport
pub struct UsbTransport {
    vendor_id: u16,
    product_id: u16,
    write_timeout: Duration,
    #[cfg(feature = "usb")]
    link: Option<UsbLink>,
}

impl UsbTransport {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            write_timeout: Duration::from_secs(10),
            #[cfg(feature = "usb")]
            link: None,
        }
    }

    /// Set the timeout applied to each bulk write
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    pub fn product_id(&self) -> u16 {
        self.product_id
    }
}

impl Default for UsbTransport {
    fn default() -> Self {
        Self::new(DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID)
    }
}

impl std::fmt::Debug for UsbTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsbTransport")
            .field("vendor_id", &format_args!("{:#06x}", self.vendor_id))
            .field("product_id", &format_args!("{:#06x}", self.product_id))
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(feature = "usb")]
#[async_trait]
impl Transport for UsbTransport {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Usb
    }

    #[instrument(skip(self), fields(vendor_id = self.vendor_id, product_id = self.product_id))]
    async fn connect(&mut self) -> PrintResult<()> {
        let (vendor_id, product_id) = (self.vendor_id, self.product_id);

        let link = tokio::task::spawn_blocking(move || UsbLink::open(vendor_id, product_id))
            .await
            .map_err(|e| PrintError::Usb(format!("Task join failed: {}", e)))??;

        info!(endpoint = link.endpoint, "Connected to USB printer");
        self.link = Some(link);
        Ok(())
    }

    #[instrument(skip(self, data), fields(data_len = data.len()))]
    async fn send(&mut self, data: &[u8]) -> PrintResult<()> {
        let link = self.link.take().ok_or(PrintError::NotConnected)?;
        let data = data.to_vec();
        let timeout = self.write_timeout;

        // The handle moves into the blocking pool and comes back with the result.
        // If the write panics the handle is gone: the transport then reports
        // disconnected and the manager reconnects on the next request.
        let (link, result) = tokio::task::spawn_blocking(move || {
            let result = link.write_all(&data, timeout);
            (link, result)
        })
        .await
        .map_err(|e| PrintError::Usb(format!("Task join failed: {}", e)))?;

        self.link = Some(link);
        result?;
        info!("Print job sent");
        Ok(())
    }

    async fn disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            link.close();
            info!("USB printer disconnected");
        }
    }

    fn is_connected(&self) -> bool {
        self.link.is_some()
    }
}

#[cfg(not(feature = "usb"))]
#[async_trait]
impl Transport for UsbTransport {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Usb
    }

    #[instrument(skip(self))]
    async fn connect(&mut self) -> PrintResult<()> {
        Err(PrintError::NotFound(
            "USB support not compiled in".to_string(),
        ))
    }

    async fn send(&mut self, _data: &[u8]) -> PrintResult<()> {
        Err(PrintError::NotConnected)
    }

    async fn disconnect(&mut self) {}

    fn is_connected(&self) -> bool {
        false
    }
}

/// An opened printer: device handle plus its bulk OUT endpoint
#[cfg(feature = "usb")]
struct UsbLink {
    handle: rusb::DeviceHandle<rusb::GlobalContext>,
    endpoint: u8,
    claimed: bool,
}

#[cfg(feature = "usb")]
impl UsbLink {
    /// Locate, open and configure the printer (blocking)
    fn open(vendor_id: u16, product_id: u16) -> PrintResult<Self> {
        use tracing::{debug, warn};

        let devices = rusb::devices()?;
        let mut found = Vec::new();
        for device in devices.iter() {
            match device.device_descriptor() {
                Ok(desc) => {
                    let identity = DeviceIdentity {
                        vendor_id: desc.vendor_id(),
                        product_id: desc.product_id(),
                        class_code: desc.class_code(),
                    };
                    found.push((device, identity));
                }
                Err(e) => debug!(error = %e, "Skipping device without descriptor"),
            }
        }

        let identities: Vec<DeviceIdentity> = found.iter().map(|(_, id)| *id).collect();
        let index = select_device(&identities, vendor_id, product_id).ok_or_else(|| {
            PrintError::NotFound(format!(
                "No USB printer (vendor {:04x}, product {:04x}, class {})",
                vendor_id, product_id, PRINTER_CLASS
            ))
        })?;
        let (device, identity) = &found[index];
        info!(
            vendor_id = identity.vendor_id,
            product_id = identity.product_id,
            bus = device.bus_number(),
            address = device.address(),
            "USB printer found"
        );

        let mut handle = device.open()?;

        // Kernel usblp holds the interface on Linux; losing it is not fatal.
        match handle.kernel_driver_active(PRINTER_INTERFACE) {
            Ok(true) => {
                if let Err(e) = handle.detach_kernel_driver(PRINTER_INTERFACE) {
                    warn!(error = %e, "Could not detach kernel driver");
                }
            }
            Ok(false) => {}
            Err(e) => debug!(error = %e, "Kernel driver query unsupported"),
        }

        let config = device.config_descriptor(0)?;
        handle.set_active_configuration(config.number())?;

        let endpoint = find_out_endpoint(&config, PRINTER_INTERFACE).ok_or_else(|| {
            PrintError::Usb(format!(
                "No OUT endpoint on interface {}",
                PRINTER_INTERFACE
            ))
        })?;

        let claimed = match handle.claim_interface(PRINTER_INTERFACE) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Could not claim printer interface");
                false
            }
        };

        Ok(Self {
            handle,
            endpoint,
            claimed,
        })
    }

    /// Write every byte, one bulk transfer at a time (blocking)
    fn write_all(&self, data: &[u8], timeout: Duration) -> PrintResult<()> {
        let mut offset = 0;
        while offset < data.len() {
            let written = self
                .handle
                .write_bulk(self.endpoint, &data[offset..], timeout)?;
            if written == 0 {
                return Err(PrintError::Usb(format!(
                    "Bulk write stalled at {}/{} bytes",
                    offset,
                    data.len()
                )));
            }
            offset += written;
        }
        Ok(())
    }

    fn close(mut self) {
        if self.claimed
            && let Err(e) = self.handle.release_interface(PRINTER_INTERFACE)
        {
            tracing::warn!(error = %e, "Could not release printer interface");
        }
    }
}

/// First OUT endpoint on `interface`, bulk preferred
#[cfg(feature = "usb")]
fn find_out_endpoint(config: &rusb::ConfigDescriptor, interface: u8) -> Option<u8> {
    let mut fallback = None;
    for iface in config.interfaces() {
        if iface.number() != interface {
            continue;
        }
        for setting in iface.descriptors() {
            for ep in setting.endpoint_descriptors() {
                if ep.direction() != rusb::Direction::Out {
                    continue;
                }
                if ep.transfer_type() == rusb::TransferType::Bulk {
                    return Some(ep.address());
                }
                fallback.get_or_insert(ep.address());
            }
        }
    }
    fallback
}
