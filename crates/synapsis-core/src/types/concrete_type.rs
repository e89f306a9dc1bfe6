//! Known platform object types.
//!
//! Platform JSON objects carry a `concreteType` field naming their Java
//! model class. [`ConcreteType`] is the closed set of codes this crate
//! knows about, with [`ConcreteType::Unknown`] standing in for the rest.

use std::fmt;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::query::{Query, field, find};

/// Code reported for unrecognized objects.
pub const UNKNOWN_CODE: &str = "UNKNOWN.Unknown";

/// Field holding the type code on platform objects.
pub const CONCRETE_TYPE_FIELD: &str = "concreteType";

macro_rules! concrete_types {
    ($($variant:ident => $code:literal,)+) => {
        /// A known platform object type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum ConcreteType {
            /// Anything not in the catalog.
            Unknown,
            $(
                #[doc = concat!("`", $code, "`")]
                $variant,
            )+
        }

        impl ConcreteType {
            /// Every catalog entry, `Unknown` first.
            pub const ALL: &'static [ConcreteType] = &[
                ConcreteType::Unknown,
                $(ConcreteType::$variant,)+
            ];

            /// The full type code.
            pub fn code(self) -> &'static str {
                match self {
                    ConcreteType::Unknown => UNKNOWN_CODE,
                    $(ConcreteType::$variant => $code,)+
                }
            }
        }
    };
}

concrete_types! {
    SynapseS3StorageLocationSetting => "org.sagebionetworks.repo.model.project.S3StorageLocationSetting",
    ExternalS3StorageLocationSetting => "org.sagebionetworks.repo.model.project.ExternalS3StorageLocationSetting",
    SynapseS3UploadDestination => "org.sagebionetworks.repo.model.file.S3UploadDestination",
    ExternalUploadDestination => "org.sagebionetworks.repo.model.file.ExternalUploadDestination",
    ExternalS3UploadDestination => "org.sagebionetworks.repo.model.file.ExternalS3UploadDestination",
    ExternalObjectStoreUploadDestination => "org.sagebionetworks.repo.model.file.ExternalObjectStoreUploadDestination",
    ExternalObjectStoreFileHandle => "org.sagebionetworks.repo.model.file.ExternalObjectStoreFileHandle",
    ExternalFileHandle => "org.sagebionetworks.repo.model.file.ExternalFileHandle",
    S3FileHandle => "org.sagebionetworks.repo.model.file.S3FileHandle",
    RowReferenceSetResults => "org.sagebionetworks.repo.model.table.RowReferenceSetResults",
    EntityUpdateResults => "org.sagebionetworks.repo.model.table.EntityUpdateResults",
    TableSchemaChangeResponse => "org.sagebionetworks.repo.model.table.TableSchemaChangeResponse",
    UploadToTableResult => "org.sagebionetworks.repo.model.table.UploadToTableResult",
    PartialRowSet => "org.sagebionetworks.repo.model.table.PartialRowSet",
    AppendableRowSetRequest => "org.sagebionetworks.repo.model.table.AppendableRowSetRequest",
    ColumnModel => "org.sagebionetworks.repo.model.table.ColumnModel",
    FileEntity => "org.sagebionetworks.repo.model.FileEntity",
    FolderEntity => "org.sagebionetworks.repo.model.Folder",
    LinkEntity => "org.sagebionetworks.repo.model.Link",
    ProjectEntity => "org.sagebionetworks.repo.model.Project",
    TableEntity => "org.sagebionetworks.repo.model.table.TableEntity",
    MultipartUploadRequest => "org.sagebionetworks.repo.model.file.MultipartUploadRequest",
    MultipartUploadCopyRequest => "org.sagebionetworks.repo.model.file.MultipartUploadCopyRequest",
}

/// Catalog row used for lookups; serializes as `{code, name}`.
#[derive(Debug, Serialize)]
struct Entry {
    code: &'static str,
    name: &'static str,
    #[serde(skip)]
    kind: ConcreteType,
}

impl ConcreteType {
    /// The short name: the last code segment without an `Entity` suffix.
    ///
    /// ```
    /// use synapsis_core::ConcreteType;
    ///
    /// assert_eq!(ConcreteType::FileEntity.name(), "File");
    /// assert_eq!(ConcreteType::ProjectEntity.name(), "Project");
    /// assert_eq!(ConcreteType::Unknown.name(), "Unknown");
    /// ```
    pub fn name(self) -> &'static str {
        let code = self.code();
        let last = code.rsplit('.').next().unwrap_or(code);
        last.strip_suffix("Entity").unwrap_or(last)
    }

    /// Resolves a code, falling back to [`ConcreteType::Unknown`].
    pub fn get(code: &str) -> ConcreteType {
        let entries = Self::entries();
        let query = Query::new().key("code").value(code);
        match find(&entries, &query) {
            Ok(Some(entry)) => entry.kind,
            _ => {
                debug!("Unrecognized concrete type '{code}'");
                ConcreteType::Unknown
            }
        }
    }

    /// Resolves the type of a platform object from its `concreteType` field.
    ///
    /// Objects without the field are [`ConcreteType::Unknown`].
    pub fn of<T: Serialize + ?Sized>(object: &T) -> ConcreteType {
        match field(object, CONCRETE_TYPE_FIELD) {
            Ok(Value::String(code)) => Self::get(&code),
            _ => ConcreteType::Unknown,
        }
    }

    /// Returns whether `object` is of type `kind`.
    pub fn is_a<T: Serialize + ?Sized>(object: &T, kind: ConcreteType) -> bool {
        Self::of(object) == kind
    }

    /// Returns whether this type is the one named by `name`.
    ///
    /// `name` may be a short name (`"file"`, `"Project"`) or the final code
    /// segment (`"FileEntity"`), compared case-insensitively. Names that no
    /// catalog entry answers to are a usage error.
    ///
    /// ```
    /// use synapsis_core::ConcreteType;
    ///
    /// assert!(ConcreteType::FileEntity.matches("file").unwrap());
    /// assert!(ConcreteType::FileEntity.matches("FileEntity").unwrap());
    /// assert!(!ConcreteType::FileEntity.matches("columnmodel").unwrap());
    /// assert!(ConcreteType::FileEntity.matches("nope").is_err());
    /// ```
    pub fn matches(self, name: &str) -> Result<bool> {
        let wanted = name.to_uppercase();
        let suffix = format!(".{wanted}");
        Self::ALL
            .iter()
            .find(|kind| {
                kind.name().to_uppercase() == wanted || kind.code().to_uppercase().ends_with(&suffix)
            })
            .map(|kind| *kind == self)
            .ok_or_else(|| Error::usage(format!("no concrete type matching '{name}'")))
    }

    /// Returns whether this is a project.
    pub fn is_project(self) -> bool {
        self == ConcreteType::ProjectEntity
    }

    /// Returns whether this is a folder.
    pub fn is_folder(self) -> bool {
        self == ConcreteType::FolderEntity
    }

    /// Returns whether this is a file.
    pub fn is_file(self) -> bool {
        self == ConcreteType::FileEntity
    }

    /// Returns whether this type is not in the catalog.
    pub fn is_unknown(self) -> bool {
        self == ConcreteType::Unknown
    }

    fn entries() -> Vec<Entry> {
        Self::ALL
            .iter()
            .map(|kind| Entry {
                code: kind.code(),
                name: kind.name(),
                kind: *kind,
            })
            .collect()
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&str> for ConcreteType {
    fn from(code: &str) -> Self {
        Self::get(code)
    }
}
