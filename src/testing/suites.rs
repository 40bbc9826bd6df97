//! Suite definitions
//!
//! The case order is part of each suite's contract: later cases depend on
//! state recorded by earlier ones.

use std::fmt;

use clap::ValueEnum;

use super::cases::SdkCase;
use super::pipeline::Pipeline;
use super::session::Session;

/// Which suite to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    /// Client credentials plus the full user lifecycle and reauthentication
    Standard,
    /// mTLS gateway authentication, then proxy authentication
    Mtls,
    /// Proxy authentication with TLS verification disabled
    Proxy,
}

impl Suite {
    pub fn name(self) -> &'static str {
        match self {
            Suite::Standard => "standard",
            Suite::Mtls => "mtls",
            Suite::Proxy => "proxy",
        }
    }

    /// Cases of the suite, in execution order
    pub fn cases(self) -> Vec<SdkCase> {
        match self {
            Suite::Standard => vec![
                SdkCase::TraceBasicInformation,
                SdkCase::Authenticate,
                SdkCase::CreateUser,
                SdkCase::UpdateUser,
                SdkCase::UpdateUserStaleVersion,
                SdkCase::SetProfileSkills,
                SdkCase::GetUser,
                SdkCase::Reauthenticate,
                SdkCase::GetUserAgain,
                SdkCase::DeleteUser,
            ],
            Suite::Mtls => vec![
                SdkCase::TraceBasicInformation,
                SdkCase::MtlsGatewayAuthenticate,
                SdkCase::ProxyAuthenticate { verify_tls: true },
            ],
            Suite::Proxy => vec![
                SdkCase::TraceBasicInformation,
                SdkCase::ProxyAuthenticate { verify_tls: false },
            ],
        }
    }

    pub fn pipeline(self) -> Pipeline<Session> {
        self.cases()
            .into_iter()
            .fold(Pipeline::new(self.name()), |pipeline, case| pipeline.case(case))
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
