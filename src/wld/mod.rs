mod bytes;
mod document;
mod error;
mod fragment;
mod handle;
mod header;
mod partition;
mod strings;

/// String cipher.
pub mod cipher;
/// Cross-document merge passes.
pub mod merge;
/// Fragment name conventions.
pub mod names;
/// Region-type classification and zonelines.
pub mod region;
/// Skeleton tree pass and track binding.
pub mod skeleton;
/// Potentially-visible-set decoding.
pub mod visibility;

/// Bounded little-endian payload cursor.
pub use bytes::Cursor;
/// Document, decode issues and post-pass options.
pub use document::{DecodeIssue, IssueKind, PassOptions, PassSummary, WldDocument};
/// Error and result aliases.
pub use error::{Result, WldError};
/// Bitmap fragments.
pub use fragment::{BitmapInfo, BitmapInfoReference, BitmapName};
/// BSP fragments.
pub use fragment::{BspNode, BspRegion, BspRegionType, BspTree, RegionData3, RegionSphere};
/// Fragment container, kinds and decode context.
pub use fragment::{DecodeContext, Fragment, FragmentBody, FragmentData, FragmentKind, Generic, type_id};
/// Actor, camera and placement fragments.
pub use fragment::{Actor, ActorAction, ActorKind, Camera, CameraReference, ObjectInstance};
/// Light fragments.
pub use fragment::{AmbientLight, GlobalAmbientLight, LightInstance, LightSource, LightSourceReference};
/// Material fragments.
pub use fragment::{Material, MaterialList, ShaderKind};
/// Mesh fragments.
pub use fragment::{Color, Mesh, MeshOp, MeshReference, Polygon, RenderGroup, VertexColors, VertexColorsReference, VertexPiece};
/// Skeleton and track fragments.
pub use fragment::{Bone, BoneTransform, SkeletonHierarchy, SkeletonHierarchyReference, TrackDefFragment, TrackFragment};
/// Arena handle.
pub use handle::FragmentRef;
/// File header.
pub use header::{WldHeader, WldVersion};
/// BSP linking.
pub use partition::{LinkSummary, RegionLink, link_region_type, link_regions};
/// Skeleton animation types.
pub use skeleton::{Animation, POSE_ANIMATION, TrackBinding, TrackName, TrackSource, TrackSummary};
/// String table.
pub use strings::StringTable;
