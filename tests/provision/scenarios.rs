//! BDD scenarios for test-environment provisioning.

use rstest_bdd_macros::scenario;

use super::test_helpers::{ProvisionContextResult, provision_context_result};

#[scenario(
    path = "tests/features/provision.feature",
    name = "Provision a run workspace from a seeded fixture"
)]
fn scenario_provision_success(provision_context_result: ProvisionContextResult) {
    drop(provision_context_result);
}

#[scenario(
    path = "tests/features/provision.feature",
    name = "A missing fixture aborts provisioning before any writes"
)]
fn scenario_missing_fixture(provision_context_result: ProvisionContextResult) {
    drop(provision_context_result);
}

#[scenario(
    path = "tests/features/provision.feature",
    name = "Provisioning twice with the same run id is idempotent"
)]
fn scenario_idempotent_reprovision(provision_context_result: ProvisionContextResult) {
    drop(provision_context_result);
}

#[scenario(
    path = "tests/features/provision.feature",
    name = "IS_DEBUG enables debug mode for any non-empty value"
)]
fn scenario_debug_truthiness(provision_context_result: ProvisionContextResult) {
    drop(provision_context_result);
}
