use release_hooks::boundary::BoundaryWarning;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_version_synced_display() {
    let warning = BoundaryWarning::ManifestVersionSynced {
        from: Some("1.0.0".to_string()),
        to: "1.2.3".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("1.0.0") && display_msg.contains("1.2.3"),
        "Message should contain both versions, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("commit"),
        "Message should tell the user to commit, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_version_set_display() {
    let warning = BoundaryWarning::ManifestVersionSynced {
        from: None,
        to: "0.1.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("set to 0.1.0"),
        "Message should mention the new version, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_downgrade_display() {
    let warning = BoundaryWarning::VersionDowngrade {
        manifest: "2.0.0".to_string(),
        branch: "1.5.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("newer"),
        "Message should contain 'newer', got: {}",
        display_msg
    );
    assert!(display_msg.contains("2.0.0"));
    assert!(display_msg.contains("1.5.0"));
}

#[test]
fn test_boundary_warning_manifest_missing_display() {
    let warning = BoundaryWarning::ManifestMissing {
        path: "/work/app/package.json".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("/work/app/package.json"),
        "Message should contain the path, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_hook_skipped_display() {
    let warning = BoundaryWarning::HookFileSkipped {
        path: ".githooks/pre-push".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("--force"),
        "Message should point at --force, got: {}",
        display_msg
    );
    assert!(display_msg.contains(".githooks/pre-push"));
}
