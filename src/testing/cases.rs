//! Smoke-test cases against the platform
//!
//! Each case reads what earlier cases left in the [`Session`] and records
//! what later cases need.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::info;
use uuid::Uuid;

use crate::client::{auth, CreateUser, UpdateUser, User};
use crate::common::{config::env_var_name, mask_secret, Error, Result};

use super::expect::{expect_eq, expect_non_empty};
use super::pipeline::TestCase;
use super::session::Session;

/// Department set by the update case
pub const USER_DEPARTMENT: &str = "Ministry of Testing";
/// Skill assigned by the profile-skills case
pub const USER_PROFILE_SKILL: &str = "Testmaster";

/// Every case the suites are assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkCase {
    TraceBasicInformation,
    Authenticate,
    MtlsGatewayAuthenticate,
    ProxyAuthenticate { verify_tls: bool },
    CreateUser,
    UpdateUser,
    UpdateUserStaleVersion,
    SetProfileSkills,
    GetUser,
    Reauthenticate,
    GetUserAgain,
    DeleteUser,
}

#[async_trait]
impl TestCase<Session> for SdkCase {
    fn name(&self) -> &str {
        match self {
            SdkCase::TraceBasicInformation => "trace_basic_information",
            SdkCase::Authenticate => "authenticate",
            SdkCase::MtlsGatewayAuthenticate => "mtls_gateway_authenticate",
            SdkCase::ProxyAuthenticate { .. } => "proxy_authenticate",
            SdkCase::CreateUser => "create_user",
            SdkCase::UpdateUser => "update_user",
            SdkCase::UpdateUserStaleVersion => "update_user_stale_version",
            SdkCase::SetProfileSkills => "set_profile_skills",
            SdkCase::GetUser => "get_user",
            SdkCase::Reauthenticate => "reauthenticate",
            SdkCase::GetUserAgain => "get_user_again",
            SdkCase::DeleteUser => "delete_user",
        }
    }

    async fn run(&self, session: &mut Session) -> Result<()> {
        match *self {
            SdkCase::TraceBasicInformation => trace_basic_information(session).await,
            SdkCase::Authenticate => authenticate(session).await,
            SdkCase::MtlsGatewayAuthenticate => mtls_gateway_authenticate(session).await,
            SdkCase::ProxyAuthenticate { verify_tls } => proxy_authenticate(session, verify_tls).await,
            SdkCase::CreateUser => create_user(session).await,
            SdkCase::UpdateUser => update_user(session).await,
            SdkCase::UpdateUserStaleVersion => update_user_stale_version(session).await,
            SdkCase::SetProfileSkills => set_profile_skills(session).await,
            SdkCase::GetUser | SdkCase::GetUserAgain => verify_user(session).await,
            SdkCase::Reauthenticate => reauthenticate(session).await,
            SdkCase::DeleteUser => delete_user(session).await,
        }
    }
}

async fn trace_basic_information(session: &mut Session) -> Result<()> {
    let prefix = session.config.env_prefix.clone();
    let credentials = session.credentials()?;

    info!("{}={}", env_var_name(&prefix, "ENVIRONMENT"), credentials.environment);
    info!("{}={}", env_var_name(&prefix, "CLIENT_ID"), credentials.client_id);

    let email = format!("{}@{}", Uuid::new_v4(), credentials.environment);
    info!(%email, "generated user email");
    session.user_email = Some(email);

    info!(version = env!("CARGO_PKG_VERSION"), "platform client");
    Ok(())
}

async fn authenticate(session: &mut Session) -> Result<()> {
    let credentials = session.credentials()?;
    let hosts = session.resolve_hosts(&credentials.environment);

    let mut client = session.client_builder(&hosts).build()?;
    let auth = client
        .get_client_credentials_token(&credentials.client_id, &credentials.client_secret)
        .await?;
    expect_non_empty("access_token", &auth.access_token)?;

    info!(token = %mask_secret(&auth.access_token), "authenticated with client credentials");
    session.set_client(client);
    Ok(())
}

/// Authenticate through the mTLS gateway, then create and delete a user with it
async fn mtls_gateway_authenticate(session: &mut Session) -> Result<()> {
    let credentials = session.credentials()?;
    let hosts = session.resolve_hosts(&credentials.environment);

    let paths = session.mtls_paths();
    info!(
        cert = %paths.cert.display(),
        key = %paths.key.display(),
        ca_chain = %paths.ca_chain.display(),
        "loading mTLS material"
    );
    let material = paths.load()?;

    let gateway = session.config.gateway.clone();
    let mut client = session
        .client_builder(&hosts)
        .mtls(material)
        .gateway(gateway)
        .build()?;
    info!(login = client.login_base(), api = client.api_base(), "routing through gateway");

    let auth = client
        .get_client_credentials_token(&credentials.client_id, &credentials.client_secret)
        .await?;
    expect_non_empty("access_token", &auth.access_token)?;
    info!(?client, "authenticated through mTLS gateway");

    session.set_client(client);
    create_user(session).await?;
    delete_user(session).await
}

/// Authenticate through the HTTP proxy, then create and delete a user with it
async fn proxy_authenticate(session: &mut Session, verify_tls: bool) -> Result<()> {
    let credentials = session.credentials()?;
    let hosts = session.resolve_hosts(&credentials.environment);

    let proxy = session.config.proxy.url.clone();
    info!(%proxy, verify_tls, "routing through proxy");
    let mut client = session
        .client_builder(&hosts)
        .proxy(proxy)
        .verify_tls(verify_tls)
        .build()?;

    let auth = client
        .get_client_credentials_token(&credentials.client_id, &credentials.client_secret)
        .await?;
    expect_non_empty("access_token", &auth.access_token)?;
    info!(?client, "authenticated through proxy");

    session.set_client(client);
    create_user(session).await?;
    delete_user(session).await
}

async fn create_user(session: &mut Session) -> Result<()> {
    let name = session.config.user_name.clone();
    let email = session.user_email()?;
    let body = CreateUser {
        name: name.clone(),
        email: email.clone(),
        password: format!("{}!@#$1234asdfASDF", Uuid::new_v4()),
    };
    info!(%name, %email, "creating user");

    let user = session.users()?.post_users(&body).await?;

    expect_non_empty("id", &user.id)?;
    session.user_id = Some(user.id.clone());
    session.user_version = user.version;
    info!(user_id = %user.id, version = ?user.version, "user created");

    expect_eq("name", &Some(name.as_str()), &user.name.as_deref())?;
    expect_eq("email", &Some(email.as_str()), &user.email.as_deref())
}

async fn update_user(session: &mut Session) -> Result<()> {
    let user_id = session.user_id()?;
    let version = session.user_version.unwrap_or(1);
    let body = UpdateUser {
        department: Some(USER_DEPARTMENT.to_string()),
        version,
    };

    let user = session.users()?.patch_user(&user_id, &body).await?;

    session.stale_version = Some(version);
    session.user_version = Some(user.version.unwrap_or(version + 1));

    expect_user_fields(session, &user)?;
    expect_eq("department", &Some(USER_DEPARTMENT), &user.department.as_deref())
}

/// An update carrying an outdated version must be rejected with 409
async fn update_user_stale_version(session: &mut Session) -> Result<()> {
    let user_id = session.user_id()?;
    let stale = session.stale_version.ok_or(Error::MissingState("stale user version"))?;
    let body = UpdateUser {
        department: Some(format!("{USER_DEPARTMENT} (stale)")),
        version: stale,
    };

    match session.users()?.patch_user(&user_id, &body).await {
        Err(e) if e.status() == Some(409) => {
            info!(stale_version = stale, "stale update rejected");
            Ok(())
        }
        Err(Error::Api { status, body, .. }) => Err(Error::TestAssertion(format!(
            "stale update status: expected 409, got {status} ({body})"
        ))),
        Err(e) => Err(e),
        Ok(user) => Err(Error::TestAssertion(format!(
            "stale update with version {stale} was accepted (user now at version {:?})",
            user.version
        ))),
    }
}

async fn set_profile_skills(session: &mut Session) -> Result<()> {
    let user_id = session.user_id()?;
    let skills = vec![USER_PROFILE_SKILL.to_string()];

    let stored = session.users()?.put_user_profileskills(&user_id, &skills).await?;

    expect_eq("profile skills count", &1, &stored.len())?;
    expect_eq("profile skills", &skills, &stored)
}

/// Read the user back and check everything earlier cases set
async fn verify_user(session: &mut Session) -> Result<()> {
    let user_id = session.user_id()?;

    let user = session.users()?.get_user(&user_id, &["profileSkills"]).await?;

    expect_user_fields(session, &user)?;
    expect_eq("department", &Some(USER_DEPARTMENT), &user.department.as_deref())?;
    let first_skill = user.profile_skills.as_ref().and_then(|s| s.first()).map(String::as_str);
    expect_eq("profile skill", &Some(USER_PROFILE_SKILL), &first_skill)
}

/// Fetch a token straight from the token endpoint and hand it to a fresh client
async fn reauthenticate(session: &mut Session) -> Result<()> {
    let credentials = session.credentials()?;
    let hosts = session.direct_hosts(&credentials.environment);
    let url = auth::token_url(&hosts.login_host);

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(session.config.http.timeout_secs))
        .user_agent(session.config.http.user_agent.clone())
        .build()?;

    let response = http
        .post(&url)
        .header(AUTHORIZATION, auth::basic_authorization(&credentials.client_id, &credentials.client_secret))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("grant_type=client_credentials")
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;
    if status != 200 {
        return Err(Error::TestAssertion(format!(
            "token status: expected 200, got {status} ({body})"
        )));
    }

    let json: serde_json::Value = serde_json::from_str(&body)?;
    let token = json
        .get("access_token")
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .to_string();
    expect_non_empty("access_token", &token)?;

    // Drop the old token so only the new one can authorize later calls
    if let Some(previous) = session.client_mut() {
        previous.clear_access_token();
    }
    let mut client = session.client_builder(&hosts).build()?;
    client.clear_access_token();
    client.set_access_token(token);
    info!(?client, "reauthenticated with directly issued token");

    session.set_client(client);
    Ok(())
}

async fn delete_user(session: &mut Session) -> Result<()> {
    let user_id = session.user_id()?;
    info!(%user_id, "deleting user");

    session.users()?.delete_user(&user_id).await?;

    info!(%user_id, "user deleted");
    session.forget_user();
    Ok(())
}

/// id, name and email must match what the session created
fn expect_user_fields(session: &Session, user: &User) -> Result<()> {
    let user_id = session.user_id()?;
    let email = session.user_email()?;
    expect_eq("id", user_id.as_str(), user.id.as_str())?;
    expect_eq("name", &Some(session.config.user_name.as_str()), &user.name.as_deref())?;
    expect_eq("email", &Some(email.as_str()), &user.email.as_deref())
}
