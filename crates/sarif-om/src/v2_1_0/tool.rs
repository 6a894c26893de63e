//! Tools, tool components and reporting descriptors (rules, notifications and taxa).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    list::NodeList,
    property_bag::PropertyBag,
    v2_1_0::{ArtifactLocation, DEFAULT_LANGUAGE, Message, MultiformatMessageString},
    wire::Sentinel,
};

/// A value specifying the severity level of a result or notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum FailureLevel {
    None,
    Note,
    Warning,
    Error,
}

leaf!(hash = std: FailureLevel);

/// The kinds of data contained in a tool component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ToolComponentContent {
    LocalizedData,
    NonLocalizedData,
}

leaf!(hash = std: ToolComponentContent);

sarif_node! {
    /// The analysis tool that was run.
    pub struct Tool {
        /// The analysis tool that was run.
        pub driver: ToolComponent,
        /// Tool extensions that contributed to or reconfigured the analysis tool that was run.
        pub extensions: Option<NodeList<ToolComponent>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A component, such as a plug-in or the driver, of the analysis tool that was run.
    pub struct ToolComponent {
        /// A unique identifier for the tool component in the form of a GUID.
        pub guid: Option<String>,
        /// The name of the tool component.
        pub name: String,
        /// The organization or company that produced the tool component.
        pub organization: Option<String>,
        /// A product suite to which the tool component belongs.
        pub product: Option<String>,
        /// A localizable string containing the name of the suite of products to which the tool component belongs.
        pub product_suite: Option<String>,
        /// A brief description of the tool component.
        pub short_description: Option<MultiformatMessageString>,
        /// A comprehensive description of the tool component.
        pub full_description: Option<MultiformatMessageString>,
        /// The name of the tool component along with its version and any other useful identifying information, such as its locale.
        pub full_name: Option<String>,
        /// The tool component version, in whatever format the component natively provides.
        pub version: Option<String>,
        /// The tool component version in the format specified by Semantic Versioning 2.0.
        pub semantic_version: Option<String>,
        /// The binary version of the tool component's primary executable file expressed as four non-negative integers separated by a period.
        pub dotted_quad_file_version: Option<String>,
        /// A string specifying the UTC date (and optionally, the time) of the component's release.
        pub release_date_utc: Option<String>,
        /// The absolute URI from which the tool component can be downloaded.
        pub download_uri: Option<String>,
        /// The absolute URI at which information about this version of the tool component can be found.
        pub information_uri: Option<String>,
        /// A dictionary, each of whose keys is a resource identifier and each of whose values is a
        /// multiformatMessageString object, which holds message strings in plain text and (optionally)
        /// Markdown format. The strings can include placeholders, which can be used to construct a
        /// message in combination with an arbitrary number of additional string arguments.
        pub global_message_strings: Option<IndexMap<String, MultiformatMessageString>>,
        /// An array of reportingDescriptor objects relevant to the notifications related to the configuration and runtime execution of the tool component.
        pub notifications: Option<NodeList<ReportingDescriptor>>,
        /// An array of reportingDescriptor objects relevant to the analysis performed by the tool component.
        pub rules: Option<NodeList<ReportingDescriptor>>,
        /// An array of reportingDescriptor objects relevant to the definitions of both standalone and tool-defined taxonomies.
        pub taxa: Option<NodeList<ReportingDescriptor>>,
        /// An array of the artifactLocation objects associated with the tool component.
        pub locations: Option<NodeList<ArtifactLocation>>,
        /// The language of the messages emitted into the log file during this run.
        pub language: Option<String>,
        /// The kinds of data contained in this object.
        pub contents: Option<Vec<ToolComponentContent>>,
        /// Specifies whether this object contains a complete definition of the localizable and/or
        /// non-localizable data for this component, as opposed to including only data that is relevant
        /// to the results persisted to this log file.
        pub is_comprehensive: Option<bool>,
        /// The semantic version of the localized strings defined in this component.
        pub localized_data_semantic_version: Option<String>,
        /// The minimum value of localizedDataSemanticVersion required in translations consumed by this component.
        pub minimum_required_localized_data_semantic_version: Option<String>,
        /// The component which is strongly associated with this component. For a translation, this
        /// refers to the component which has been translated. For an extension, this is the driver
        /// that provides the extension's plugin model.
        pub associated_component: Option<ToolComponentReference>,
        /// Translation metadata, required for a translation, not populated by other component types.
        pub translation_metadata: Option<TranslationMetadata>,
        /// An array of toolComponentReference objects to declare the taxonomies supported by the tool component.
        pub supported_taxonomies: Option<NodeList<ToolComponentReference>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Identifies a particular toolComponent object, either the driver or an extension.
    pub struct ToolComponentReference {
        /// The 'name' property of the referenced toolComponent.
        pub name: Option<String>,
        /// An index into the referenced toolComponent in tool.extensions.
        pub index: Sentinel,
        /// The 'guid' property of the referenced toolComponent.
        pub guid: Option<String>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Provides additional metadata related to translation.
    pub struct TranslationMetadata {
        /// The name associated with the translation metadata.
        pub name: String,
        /// The full name associated with the translation metadata.
        pub full_name: Option<String>,
        /// A brief description of the translation metadata.
        pub short_description: Option<MultiformatMessageString>,
        /// A comprehensive description of the translation metadata.
        pub full_description: Option<MultiformatMessageString>,
        /// The absolute URI from which the translation metadata can be downloaded.
        pub download_uri: Option<String>,
        /// The absolute URI from which information related to the translation metadata can be downloaded.
        pub information_uri: Option<String>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Metadata that describes a specific report produced by the tool, as part of the analysis it
    /// provides or its runtime reporting.
    pub struct ReportingDescriptor {
        /// A stable, opaque identifier for the report.
        pub id: String,
        /// An array of stable, opaque identifiers by which this report was known in some previous version of the analysis tool.
        pub deprecated_ids: Option<Vec<String>>,
        /// A unique identifier for the reporting descriptor in the form of a GUID.
        pub guid: Option<String>,
        /// An array of unique identifies in the form of a GUID by which this report was known in some previous version of the analysis tool.
        pub deprecated_guids: Option<Vec<String>>,
        /// A report identifier that is understandable to an end user.
        pub name: Option<String>,
        /// An array of readable identifiers by which this report was known in some previous version of the analysis tool.
        pub deprecated_names: Option<Vec<String>>,
        /// A concise description of the report. Should be a single sentence that is understandable
        /// when visible space is limited to a single line of text.
        pub short_description: Option<MultiformatMessageString>,
        /// A description of the report. Should, as far as possible, provide details sufficient to
        /// enable resolution of any problem indicated by the result.
        pub full_description: Option<MultiformatMessageString>,
        /// A set of name/value pairs with arbitrary names. Each value is a multiformatMessageString
        /// object, which holds message strings in plain text and (optionally) Markdown format.
        pub message_strings: Option<IndexMap<String, MultiformatMessageString>>,
        /// Default reporting configuration information.
        pub default_configuration: Option<ReportingConfiguration>,
        /// A URI where the primary documentation for the report can be found.
        pub help_uri: Option<String>,
        /// Provides the primary documentation for the report, useful when there is no online documentation.
        pub help: Option<MultiformatMessageString>,
        /// An array of objects that describe relationships between this reporting descriptor and others.
        pub relationships: Option<NodeList<ReportingDescriptorRelationship>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Information about how to locate a relevant reporting descriptor.
    pub struct ReportingDescriptorReference {
        /// The id of the descriptor.
        pub id: Option<String>,
        /// The index into an array of descriptors in toolComponent.ruleDescriptors,
        /// toolComponent.notificationDescriptors, or toolComponent.taxonomyDescriptors, depending on context.
        pub index: Sentinel,
        /// A guid that uniquely identifies the descriptor.
        pub guid: Option<String>,
        /// A reference used to locate the toolComponent associated with the descriptor.
        pub tool_component: Option<ToolComponentReference>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Information about the relation of one reporting descriptor to another.
    pub struct ReportingDescriptorRelationship {
        /// A reference to the related reporting descriptor.
        pub target: ReportingDescriptorReference,
        /// A set of distinct strings that categorize the relationship. Well-known kinds include
        /// 'canPrecede', 'canFollow', 'willPrecede', 'willFollow', 'superset', 'subset', 'equal',
        /// 'disjoint', 'relevant', and 'incomparable'.
        pub kinds: Option<Vec<String>>,
        /// A description of the reporting descriptor relationship.
        pub description: Option<Message>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Information about a rule or notification that can be configured at runtime.
    pub struct ReportingConfiguration {
        /// Specifies whether the report may be produced during the scan.
        pub enabled: Option<bool>,
        /// Specifies the failure level for the report.
        pub level: Option<FailureLevel>,
        /// Specifies the relative priority of the report. Used for analysis output only.
        pub rank: Option<f64>,
        /// Contains configuration information specific to a report.
        pub parameters: Option<PropertyBag>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Information about how a specific rule or notification was reconfigured at runtime.
    pub struct ConfigurationOverride {
        /// Specifies how the rule or notification was configured during the scan.
        pub configuration: ReportingConfiguration,
        /// A reference used to locate the descriptor whose configuration was overridden.
        pub descriptor: ReportingDescriptorReference,
        pub properties: Option<PropertyBag>,
    }
}

impl Tool {
    /// Creates a tool whose driver is named `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            driver: ToolComponent::new(name),
            ..Default::default()
        }
    }

    /// Iterates over the driver followed by every extension.
    pub fn components(&self) -> impl Iterator<Item = &ToolComponent> {
        std::iter::once(&self.driver).chain(self.extensions.iter().flat_map(|e| e.iter()))
    }

    /// Returns the tool component that `reference` points at.
    ///
    /// A set `index` selects an extension. Otherwise the component is
    /// matched by `guid`, then by `name`, over the driver and extensions.
    /// No reference, or one that names nothing, means the driver.
    pub fn component(&self, reference: Option<&ToolComponentReference>) -> Option<&ToolComponent> {
        let Some(reference) = reference else {
            return Some(&self.driver);
        };

        if let Some(index) = reference.index.as_index() {
            return self.extensions.as_ref()?.get(index);
        }

        match (reference.guid.as_deref(), reference.name.as_deref()) {
            (None, None) => Some(&self.driver),
            (guid, name) => guid
                .and_then(|guid| {
                    self.components()
                        .find(|c| c.guid.as_deref().is_some_and(|g| g.eq_ignore_ascii_case(guid)))
                })
                .or_else(|| name.and_then(|name| self.components().find(|c| c.name == name))),
        }
    }
}

impl ToolComponent {
    /// Creates a tool component named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the component's language, falling back to `en-US`.
    pub fn effective_language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Returns the rule at `index` in this component's `rules`.
    pub fn rule(&self, index: usize) -> Option<&ReportingDescriptor> {
        self.rules.as_ref()?.get(index)
    }

    /// Finds a rule by its `id`.
    pub fn rule_by_id(&self, id: &str) -> Option<&ReportingDescriptor> {
        self.rules.as_ref()?.iter().find(|rule| rule.id == id)
    }
}

impl ReportingDescriptor {
    /// Creates a reporting descriptor with the given `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Looks up one of this descriptor's message strings.
    pub fn message_string(&self, id: &str) -> Option<&MultiformatMessageString> {
        self.message_strings.as_ref()?.get(id)
    }
}

impl ReportingConfiguration {
    /// Returns whether the report is enabled, defaulting to `true`.
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Returns the configured failure level, defaulting to [`FailureLevel::Warning`].
    pub fn effective_level(&self) -> FailureLevel {
        self.level.unwrap_or(FailureLevel::Warning)
    }

    /// Returns the configured rank, defaulting to `-1.0`.
    pub fn effective_rank(&self) -> f64 {
        self.rank.unwrap_or(-1.0)
    }
}
