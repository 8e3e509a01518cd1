use std::io::Write;
use termcheck_io::{
    ChannelError, DEFAULT_BAUD, DEFAULT_PORT, RecordingChannel, SerialChannel, SerialConfig,
    scan_ports,
};

// ============================================================================
// SerialConfig Tests
// ============================================================================

#[test]
fn test_serial_config_default() {
    let config = SerialConfig::default();
    assert_eq!(config.port_name, "/dev/ttyUSB0");
    assert_eq!(config.port_name, DEFAULT_PORT);
    assert_eq!(config.baud_rate, 9600);
    assert_eq!(config.baud_rate, DEFAULT_BAUD);
    assert_eq!(config.data_bits, 8);
    assert!(!config.flow_control);
}

#[test]
fn test_serial_config_debug() {
    let config = SerialConfig {
        port_name: "COM1".to_string(),
        baud_rate: 57600,
        data_bits: 8,
        flow_control: false,
    };
    let debug = format!("{:?}", config);
    assert!(debug.contains("COM1"));
    assert!(debug.contains("57600"));
}

// ============================================================================
// SerialChannel Tests
// ============================================================================

#[test]
fn test_open_nonexistent_port_is_unavailable() {
    let config = SerialConfig {
        port_name: "/dev/nonexistent_termcheck_port".to_string(),
        ..SerialConfig::default()
    };
    let err = SerialChannel::open(&config).unwrap_err();
    match &err {
        ChannelError::Unavailable { port, .. } => {
            assert_eq!(port, "/dev/nonexistent_termcheck_port");
        }
        other => panic!("Wrong variant: {:?}", other),
    }
    let msg = err.to_string();
    assert!(msg.contains("Failed to open"));
    assert!(msg.contains("nonexistent_termcheck_port"));
}

#[test]
fn test_open_rejects_bad_data_bits() {
    let config = SerialConfig {
        port_name: "/dev/nonexistent_termcheck_port".to_string(),
        data_bits: 9,
        ..SerialConfig::default()
    };
    match SerialChannel::open(&config) {
        Err(ChannelError::InvalidDataBits { bits, .. }) => assert_eq!(bits, 9),
        other => panic!("Expected InvalidDataBits, got {:?}", other),
    }
}

#[test]
fn test_scan_ports_does_not_panic() {
    // Result depends on the machine; only the call contract matters here.
    if let Ok(ports) = scan_ports() {
        assert!(ports.iter().all(|p| !p.is_empty()));
    }
}

// ============================================================================
// RecordingChannel Tests
// ============================================================================

#[test]
fn test_recording_channel_keeps_each_write() {
    let mut channel = RecordingChannel::new();
    channel.write_all(b"\x1B[2J").unwrap();
    channel.write_all(b"hello\r\n").unwrap();

    let records = channel.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], b"\x1B[2J");
    assert_eq!(records[1], b"hello\r\n");
    assert_eq!(channel.bytes(), b"\x1B[2Jhello\r\n");
}

#[test]
fn test_recording_channel_clones_share_buffer() {
    let observer = RecordingChannel::new();
    let mut writer = observer.clone();
    writer.write_all(b"abc").unwrap();
    writer.flush().unwrap();

    assert_eq!(observer.bytes(), b"abc");
    assert_eq!(observer.flushes(), 1);
}

#[test]
fn test_recording_channel_clear() {
    let mut channel = RecordingChannel::new();
    channel.write_all(b"x").unwrap();
    channel.flush().unwrap();
    channel.clear();
    assert!(channel.records().is_empty());
    assert_eq!(channel.flushes(), 0);
}

#[test]
fn test_recording_channel_failing_after() {
    let mut channel = RecordingChannel::failing_after(1);
    channel.write_all(b"first").unwrap();
    let err = channel.write_all(b"second").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    assert_eq!(channel.records().len(), 1);
}
