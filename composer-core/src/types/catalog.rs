#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParamLocation {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(ParamLocation::Path),
            "query" => Some(ParamLocation::Query),
            "header" => Some(ParamLocation::Header),
            "cookie" => Some(ParamLocation::Cookie),
            _ => None,
        }
    }

    pub(crate) fn rank(self) -> u8 {
        match self {
            ParamLocation::Path => 0,
            ParamLocation::Query => 1,
            ParamLocation::Header => 2,
            ParamLocation::Cookie => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperationParam {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
}

impl OperationParam {
    /// Merge duplicate (location, name) pairs, keeping `required` if any copy
    /// requires it, and order path < query < header < cookie, then by name.
    pub fn dedupe(params: Vec<OperationParam>) -> Vec<OperationParam> {
        let mut out: Vec<OperationParam> = Vec::with_capacity(params.len());
        for p in params {
            match out
                .iter_mut()
                .find(|o| o.location == p.location && o.name == p.name)
            {
                Some(existing) => existing.required |= p.required,
                None => out.push(p),
            }
        }
        out.sort_by(|a, b| (a.location.rank(), &a.name).cmp(&(b.location.rank(), &b.name)));
        out
    }
}

/// One invocable operation, derived once per loaded OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperationCatalogEntry {
    pub service: String,
    pub operation_id: String,
    pub method: String,
    pub path: String,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<OperationParam>,
}
