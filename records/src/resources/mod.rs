//! Editable entities of the administration surface.


mod access;
mod documents;
mod endpoints;
mod instances;
mod rules;

pub use access::{AccessToken, AiProvider};
pub use documents::{DocumentLayout, DocumentType, LayoutDraft, LayoutField, LayoutPoint};
pub use endpoints::{ApiEndpoint, FtpEndpoint, LocalStorageFolder, QueryParam};
pub use instances::{ScanningDevice, WindowsAppInstance, choose_device};
pub use rules::{Destination, DestinationTarget, ProcessingRule};

choice_enum! {
    /// How an API destination authenticates.
    AuthType {
        None => "none", "None";
        ApiKey => "api_key", "API key";
        Basic => "basic", "Basic";
        Bearer => "bearer", "Bearer token";
        OAuth => "oauth", "OAuth";
    }
}

choice_enum! {
    HttpMethod {
        Get => "GET", "GET";
        Post => "POST", "POST";
        Put => "PUT", "PUT";
        Patch => "PATCH", "PATCH";
        Delete => "DELETE", "DELETE";
    }
}

choice_enum! {
    /// Type of a query-parameter value.
    ParamType {
        String => "string", "String";
        Number => "number", "Number";
        Boolean => "boolean", "Boolean";
    }
}

choice_enum! {
    /// Operating mode of a Windows agent.
    AppMode {
        Headless => "headless", "Headless";
        Standalone => "standalone", "Standalone";
    }
}
