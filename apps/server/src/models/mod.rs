//! Domain models and DTOs for printdesk.

pub mod address;
pub mod admin_profile;
pub mod batch;
pub mod model_run;
pub mod notification;
pub mod order;
pub mod print_order;
pub mod sticker;

// Re-export commonly used types
pub use address::{
    NormalizeAddressResponse, PhysicalMailOrderResponse, ShippingAddress, ShippingStatus,
    UpdateTrackingRequest,
};
pub use admin_profile::{AdminProfileResponse, UpsertAdminProfileRequest};
pub use batch::{
    AssignBatchRequest, BatchAssignResponse, BatchListResponse, BatchReleaseResponse, BatchSummary,
};
pub use model_run::{
    ListModelRunsQuery, ModelRunDetailResponse, ModelRunListResponse, ModelRunResponse,
};
pub use notification::{EmailRequest, EmailSentResponse};
pub use order::{CombinedOrder, ListOrdersQuery, OrderDetailResponse, OrderListResponse};
pub use print_order::{PrintOrderResponse, PrintStatus, UpdatePrintOrderRequest};
pub use sticker::{CreateStickerSheetRequest, StickerLayout, StickerSheetResponse, UploadResponse};
