use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", dir)
        .env_remove("EXPENSES_TODAY")
        .args(["--today", "2024-05-25"]);
    cmd
}

fn add(dir: &Path, amount: &str, category: &str, description: &str, date: &str) {
    expenses(dir)
        .args(["add", amount, category, "-d", description, "--date", date])
        .assert()
        .success();
}

fn seed(dir: &Path) {
    add(dir, "45.50", "Food", "Groceries", "2024-05-20");
    add(dir, "12.00", "Food", "Lunch", "2024-05-24");
    add(dir, "1200", "Housing", "Rent", "2024-05-01");
    add(dir, "60", "Transport", "Fuel", "2024-04-15");
}

#[test]
fn test_add_and_list() {
    let dir = TempDir::new().unwrap();
    expenses(dir.path())
        .args(["add", "45.50", "Food", "-d", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense: 2024-05-25 Groceries [Food]"));

    expenses(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("1 expenses, total $45.50"));
}

#[test]
fn test_list_filters_and_sorts() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());

    expenses(dir.path())
        .args(["list", "-c", "Food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 expenses, total $57.50"))
        .stdout(predicate::str::contains("Rent").not());

    expenses(dir.path())
        .args(["list", "--search", "RENT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 expenses, total $1200.00"));

    let output = expenses(dir.path())
        .args(["list", "--sort", "amount", "--asc"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lunch = stdout.find("Lunch").unwrap();
    let rent = stdout.find("Rent").unwrap();
    assert!(lunch < rent);

    expenses(dir.path())
        .args(["list", "--from", "2024-05-01", "--to", "2024-05-31", "--min", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 expenses, total $1245.50"));
}

#[test]
fn test_list_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();
    expenses(dir.path())
        .args(["list", "--from", "2024-05-31", "--to", "2024-05-01"])
        .assert()
        .failure();
}

#[test]
fn test_add_rejects_invalid_amount() {
    let dir = TempDir::new().unwrap();
    expenses(dir.path())
        .args(["add", "-5", "Food"])
        .assert()
        .failure();
    expenses(dir.path())
        .args(["add", "abc", "Food"])
        .assert()
        .failure();

    expenses(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn test_category_list() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    expenses(dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining"))
        .stdout(predicate::str::is_match(r"Housing\s+#f59e0b\s+1\n").unwrap())
        .stdout(predicate::str::contains("Transport "));
}

#[test]
fn test_category_color_is_shared() {
    let dir = TempDir::new().unwrap();
    expenses(dir.path())
        .args(["add", "5", "Food", "--color", "#ef4444"])
        .assert()
        .success();
    expenses(dir.path())
        .args(["add", "3", "Food"])
        .assert()
        .success();
    expenses(dir.path())
        .args(["add", "4", "Food", "--color", "#000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category edit"));

    let out = dir.path().join("all.csv");
    expenses(dir.path())
        .arg("export")
        .arg(&out)
        .assert()
        .success();
    let csv = fs::read_to_string(&out).unwrap();
    assert_eq!(csv.matches(",#ef4444,").count(), 2);
}

#[test]
fn test_category_add_edit_remove() {
    let dir = TempDir::new().unwrap();
    expenses(dir.path())
        .args(["category", "add", "Pets", "--color", "#a855f7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added category: Pets (#a855f7)"));
    expenses(dir.path())
        .args(["category", "add", "Pets"])
        .assert()
        .failure();

    add(dir.path(), "40", "Pets", "Vet", "2024-05-20");
    expenses(dir.path())
        .args(["budget", "set", "Pets", "100"])
        .assert()
        .success();

    expenses(dir.path())
        .args(["category", "edit", "Pets", "--name", "Animals", "--color", "#14b8a6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated category: Animals (#14b8a6)"))
        .stdout(predicate::str::contains("1 expense(s) updated"));

    expenses(dir.path())
        .args(["list", "-c", "Animals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vet"));
    expenses(dir.path())
        .args(["budget", "remove", "Animals"])
        .assert()
        .success();

    expenses(dir.path())
        .args(["category", "remove", "Animals"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("used by 1 expense(s)"));
    expenses(dir.path())
        .args(["category", "remove", "Shopping"])
        .assert()
        .success();
    expenses(dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping").not());
}

#[test]
fn test_edit_expense() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "45.50", "Food", "Groceries", "2024-05-20");
    let stored = fs::read_to_string(dir.path().join("data").join("expenses.json")).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&stored).unwrap();
    let id = snapshot["expenses"][0]["id"].as_str().unwrap().to_string();

    expenses(dir.path())
        .args(["edit", &id, "--amount", "50", "-c", "Housing", "--date", "2024-05-21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated expense: 2024-05-21 Groceries [Housing]"));

    expenses(dir.path())
        .args(["edit", &id, "--amount", "0"])
        .assert()
        .failure();
    expenses(dir.path())
        .args(["edit", "missing", "--amount", "5"])
        .assert()
        .failure();
    expenses(dir.path())
        .args(["edit", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes specified"));

    expenses(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 expenses, total $50.00"))
        .stdout(predicate::str::contains("Housing"));
}

#[test]
fn test_budget_set_and_list() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());

    expenses(dir.path())
        .args(["budget", "set", "Food", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set budget: Food"));

    expenses(dir.path())
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Status as of 2024-05-25"))
        .stdout(predicate::str::contains("1 budget(s) exceeded"));

    expenses(dir.path())
        .args(["budget", "remove", "Food"])
        .assert()
        .success();
    expenses(dir.path())
        .args(["budget", "remove", "Food"])
        .assert()
        .failure();
}

#[test]
fn test_reports() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());

    expenses(dir.path())
        .args(["report", "spending", "--from", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spending Report: since 2024-05-01"))
        .stdout(predicate::str::contains("Total Spending: $1257.50"));

    expenses(dir.path())
        .args(["report", "trends", "--by", "day"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily spending for 2024-05"));

    expenses(dir.path())
        .args(["report", "trends", "--by", "month", "--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-04"))
        .stdout(predicate::str::contains("2024-05"));

    expenses(dir.path())
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spending Summary as of 2024-05-25"))
        .stdout(predicate::str::contains("$1257.50"));
}

#[test]
fn test_report_to_csv() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    let out = dir.path().join("spending.csv");

    expenses(dir.path())
        .args(["report", "spending", "-o"])
        .arg(&out)
        .assert()
        .success();

    let contents = fs::read_to_string(&out).unwrap();
    assert!(contents.contains("Housing"));
    assert!(contents.contains("1200.00"));
}

#[test]
fn test_import_csv() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bank.csv");
    fs::write(
        &file,
        "Date,Description,Category,Amount\n\
         2024-05-01,Coffee,Food,3.50\n\
         ,Parking,Transport,8.00\n\
         2024-05-02,Broken,Food,-1\n",
    )
    .unwrap();

    expenses(dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:    2"))
        .stdout(predicate::str::contains("Errors:      1"))
        .stdout(predicate::str::contains("Line 4"));

    expenses(dir.path())
        .args(["list", "-c", "Transport"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-05-25"));
}

#[test]
fn test_export_csv_and_json_round_trip() {
    let dir = TempDir::new().unwrap();
    seed(dir.path());
    expenses(dir.path())
        .args(["budget", "set", "Food", "300"])
        .assert()
        .success();

    let csv_out = dir.path().join("food.csv");
    expenses(dir.path())
        .args(["export", "-c", "Food"])
        .arg(&csv_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 expenses"));
    let csv = fs::read_to_string(&csv_out).unwrap();
    assert!(csv.starts_with("Date,Description,Category,Amount,Color,Currency,ID"));
    assert!(csv.find("Groceries").unwrap() < csv.find("Lunch").unwrap());
    assert!(!csv.contains("Rent"));

    let json_out = dir.path().join("snapshot.json");
    expenses(dir.path())
        .args(["export", "--pretty"])
        .arg(&json_out)
        .assert()
        .success();
    let json = fs::read_to_string(&json_out).unwrap();
    assert!(json.contains("\"schema_version\""));

    // Filters are rejected for full snapshots
    expenses(dir.path())
        .args(["export", "-c", "Food"])
        .arg(dir.path().join("bad.json"))
        .assert()
        .failure();

    let other = TempDir::new().unwrap();
    expenses(other.path())
        .arg("import")
        .arg(&json_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:    4"))
        .stdout(predicate::str::contains("Budgets:     1"));

    // Importing the same snapshot again skips every expense
    expenses(other.path())
        .arg("import")
        .arg(&json_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped:     4"));
}

#[test]
fn test_config_updates_settings() {
    let dir = TempDir::new().unwrap();
    expenses(dir.path())
        .args(["config", "--currency-symbol", "€"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved."));

    add(dir.path(), "9.99", "Food", "Snack", "2024-05-25");
    expenses(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("€9.99"));
}
