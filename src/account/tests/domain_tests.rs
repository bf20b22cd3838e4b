//! Unit tests for account domain values and the points balance.

use crate::account::domain::{
    AccountDomainError, EmailAddress, LoginName, PasswordHash, PersistedAccountData,
    PointsBalance, Role, UserAccount,
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn sample_account(balance: u32, clock: &DefaultClock) -> Result<UserAccount, AccountDomainError> {
    Ok(UserAccount::new(
        LoginName::new("Aigerim")?,
        "Aigerim Seitova".to_owned(),
        EmailAddress::new("aigerim@asar.dev")?,
        PasswordHash::derive("secret"),
        Role::User,
        PointsBalance::new(balance),
        clock,
    ))
}

#[rstest]
#[case("aigerim", "aigerim")]
#[case("  Daniyar  ", "daniyar")]
#[case("MARAT", "marat")]
fn login_names_are_normalised(#[case] raw: &str, #[case] expected: &str) {
    let login = LoginName::new(raw).map(|name| name.as_str().to_owned());
    assert_eq!(login.as_deref(), Ok(expected));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("two words")]
fn invalid_login_names_are_rejected(#[case] raw: &str) {
    assert!(matches!(
        LoginName::new(raw),
        Err(AccountDomainError::InvalidLoginName(_))
    ));
}

#[rstest]
#[case("aigerim@asar.dev")]
#[case("a@b")]
fn valid_email_addresses_are_accepted(#[case] raw: &str) {
    assert!(EmailAddress::new(raw).is_ok());
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@asar.dev")]
#[case("aigerim@")]
#[case("a@b@c")]
#[case("spaced name@asar.dev")]
fn invalid_email_addresses_are_rejected(#[case] raw: &str) {
    assert!(matches!(
        EmailAddress::new(raw),
        Err(AccountDomainError::InvalidEmailAddress(_))
    ));
}

#[rstest]
fn password_hash_verifies_the_original_only() {
    let hash = PasswordHash::derive("correct horse");
    assert!(hash.verify("correct horse"));
    assert!(!hash.verify("wrong pony"));
}

#[rstest]
fn same_password_derives_distinct_salted_hashes() {
    let first = PasswordHash::derive("secret");
    let second = PasswordHash::derive("secret");
    assert_ne!(first, second);
    assert!(first.verify("secret"));
    assert!(second.verify("secret"));
}

#[rstest]
fn balance_debit_clamps_at_zero() {
    let balance = PointsBalance::new(10);
    assert_eq!(balance.debited_clamped(25), PointsBalance::ZERO);
    assert_eq!(balance.debited_clamped(4).points(), 6);
}

#[rstest]
fn balance_credit_accumulates() {
    let balance = PointsBalance::ZERO.credited(50).credited(25);
    assert_eq!(balance.points(), 75);
}

#[rstest]
fn fund_rejects_an_underfunded_debit(clock: DefaultClock) -> eyre::Result<()> {
    let mut account = sample_account(10, &clock)?;

    let result = account.fund(50, &clock);

    ensure!(
        result
            == Err(AccountDomainError::InsufficientPoints {
                required: 50,
                available: 10,
            })
    );
    ensure!(account.balance().points() == 10);
    Ok(())
}

#[rstest]
fn fund_debits_exactly(clock: DefaultClock) -> eyre::Result<()> {
    let mut account = sample_account(200, &clock)?;
    account.fund(50, &clock)?;
    ensure!(account.balance().points() == 150);
    Ok(())
}

#[rstest]
fn profile_carries_no_credentials(clock: DefaultClock) -> eyre::Result<()> {
    let account = sample_account(200, &clock)?;
    let profile = account.profile();

    let raw = serde_json::to_string(&profile)?;
    ensure!(!raw.contains("password"));
    ensure!(!raw.contains("salt"));
    ensure!(!raw.contains("digest"));
    ensure!(profile.login.as_str() == "aigerim");
    ensure!(profile.balance.points() == 200);
    Ok(())
}

#[rstest]
fn role_round_trips_through_storage_representation() -> eyre::Result<()> {
    for role in [Role::Admin, Role::User] {
        ensure!(Role::try_from(role.as_str())? == role);
    }
    ensure!(Role::try_from("moderator").is_err());
    Ok(())
}

#[rstest]
fn persisted_reconstruction_preserves_every_field(clock: DefaultClock) -> eyre::Result<()> {
    let account = sample_account(120, &clock)?;
    let rebuilt = UserAccount::from_persisted(PersistedAccountData {
        id: account.id(),
        login: account.login().clone(),
        display_name: account.display_name().to_owned(),
        email: account.email().clone(),
        password: PasswordHash::derive("secret"),
        role: account.role(),
        balance: account.balance(),
        created_at: account.created_at(),
        updated_at: account.updated_at(),
    });

    ensure!(rebuilt.id() == account.id());
    ensure!(rebuilt.login() == account.login());
    ensure!(rebuilt.balance() == account.balance());
    ensure!(rebuilt.verify_password("secret"));
    Ok(())
}

#[rstest]
fn update_profile_rejects_an_empty_display_name(clock: DefaultClock) -> eyre::Result<()> {
    let mut account = sample_account(200, &clock)?;
    let result = account.update_profile(Some("   ".to_owned()), None, &clock);
    ensure!(result == Err(AccountDomainError::EmptyDisplayName));
    ensure!(account.display_name() == "Aigerim Seitova");
    Ok(())
}
