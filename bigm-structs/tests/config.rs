use bigm_structs::config::{BigMConfig, BigMMethod, KernelConfig, DEFAULT_TOLERANCE};
use bigm_utils::jsonify;

#[test]
fn test_kernel_config_default() {
    assert_eq!(KernelConfig::default().tolerance, 1e-6);
    assert_eq!(
        KernelConfig::from_json_str("{}").unwrap(),
        KernelConfig::default()
    );
}

#[test]
fn test_kernel_config_from_json() {
    let config = KernelConfig::from_json_str(r#"{"tolerance": 1e-9}"#).unwrap();
    assert_eq!(config.tolerance, 1e-9);
    assert!(KernelConfig::from_json_str(r#"{"tolerance": -1.0}"#).is_err());
    assert!(KernelConfig::from_json_str(r#"{"tolerance": "small"}"#).is_err());
}

#[test]
fn test_big_m_config_from_json() {
    let config = BigMConfig::from_json_str(r#"{"epsilon": 0.2}"#).unwrap();
    assert_eq!(config.epsilon, 0.2);
    assert_eq!(config.method, BigMMethod::Song);
    assert_eq!(config.kernel, None);
    assert_eq!(config.kernel_config().tolerance, DEFAULT_TOLERANCE);

    let config = BigMConfig::from_json_str(
        r#"{"epsilon": 0.1, "method": "naive", "kernel": {"tolerance": 0.001}}"#,
    )
    .unwrap();
    assert_eq!(config.method, BigMMethod::Naive);
    assert_eq!(config.kernel_config().tolerance, 0.001);
}

#[test]
fn test_big_m_config_rejects_bad_values() {
    assert!(BigMConfig::from_json_str(r#"{"epsilon": 1.5}"#).is_err());
    assert!(BigMConfig::from_json_str(r#"{"epsilon": 0.1, "method": "belotti"}"#).is_err());
    assert!(
        BigMConfig::from_json_str(r#"{"epsilon": 0.1, "kernel": {"tolerance": -0.5}}"#).is_err()
    );
}

#[test]
fn test_big_m_config_skips_missing_kernel() {
    let config = BigMConfig {
        epsilon: 0.25,
        method: BigMMethod::Song,
        kernel: None,
    };
    assert_eq!(
        jsonify(&config).unwrap(),
        r#"{"epsilon":0.25,"method":"song"}"#
    );
}
