use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_battleship"))
        .args(["sim", "--seed", "12345", "--games", "2", "--trace"])
        .env("BATTLESHIP_LOG", "warn")
        .output()
        .expect("failed to run battleship binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let v: serde_json::Value = serde_json::from_str(line).expect("invalid json");
        assert!(matches!(v["winner"].as_str(), Some("player") | Some("computer")));
        assert_eq!(v["difficulty"], "normal");
        assert!(v["computer_trace"].is_array());
    }
}
