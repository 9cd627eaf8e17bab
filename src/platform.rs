//! Platform types the registry names without declaring.
//!
//! vk.xml references windowing-system and codec types that live in
//! platform headers, so the catalog is pre-populated with nodes for
//! them. A `<type>` record without a category must both appear here and
//! carry the matching `requires` header to be accepted.

use std::collections::BTreeMap;

use crate::cpp::{Arch, Kind, TypeId, TypeStore};

/// Header a category-less `<type>` record must `require` to be accepted
/// as a platform type.
pub(crate) fn required_header(name: &str) -> Option<&'static str> {
    REQUIRED_HEADERS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, header)| *header)
}

const VIDEO_H264_H: &str = "vk_video/vulkan_video_codec_h264std.h";
const VIDEO_H264_DECODE_H: &str = "vk_video/vulkan_video_codec_h264std_decode.h";
const VIDEO_H264_ENCODE_H: &str = "vk_video/vulkan_video_codec_h264std_encode.h";
const VIDEO_H265_H: &str = "vk_video/vulkan_video_codec_h265std.h";
const VIDEO_H265_DECODE_H: &str = "vk_video/vulkan_video_codec_h265std_decode.h";
const VIDEO_H265_ENCODE_H: &str = "vk_video/vulkan_video_codec_h265std_encode.h";
const VIDEO_AV1_H: &str = "vk_video/vulkan_video_codec_av1std.h";
const VIDEO_AV1_DECODE_H: &str = "vk_video/vulkan_video_codec_av1std_decode.h";

const REQUIRED_HEADERS: &[(&str, &str)] = &[
    ("_screen_context", "screen/screen.h"),
    ("_screen_window", "screen/screen.h"),
    ("_screen_buffer", "screen/screen.h"),
    ("NvSciSyncAttrList", "nvscisync.h"),
    ("NvSciSyncObj", "nvscisync.h"),
    ("NvSciSyncFence", "nvscisync.h"),
    ("NvSciBufAttrList", "nvscibuf.h"),
    ("NvSciBufObj", "nvscibuf.h"),
    ("char", "vk_platform"),
    ("Display", "X11/Xlib.h"),
    ("DWORD", "windows.h"),
    ("float", "vk_platform"),
    ("double", "vk_platform"),
    ("GgpFrameToken", "ggp_c/vulkan_types.h"),
    ("GgpStreamDescriptor", "ggp_c/vulkan_types.h"),
    ("HANDLE", "windows.h"),
    ("HINSTANCE", "windows.h"),
    ("HMONITOR", "windows.h"),
    ("HWND", "windows.h"),
    ("IDirectFB", "directfb.h"),
    ("IDirectFBSurface", "directfb.h"),
    ("int", ""),
    ("int8_t", "vk_platform"),
    ("int16_t", "vk_platform"),
    ("int32_t", "vk_platform"),
    ("int64_t", "vk_platform"),
    ("LPCWSTR", "windows.h"),
    ("RROutput", "X11/extensions/Xrandr.h"),
    ("SECURITY_ATTRIBUTES", "windows.h"),
    ("size_t", "vk_platform"),
    ("StdVideoDecodeH264Mvc", VIDEO_H264_DECODE_H),
    ("StdVideoDecodeH264MvcElement", VIDEO_H264_DECODE_H),
    ("StdVideoDecodeH264MvcElementFlags", VIDEO_H264_DECODE_H),
    ("StdVideoDecodeH264PictureInfo", VIDEO_H264_DECODE_H),
    ("StdVideoDecodeH264PictureInfoFlags", VIDEO_H264_DECODE_H),
    ("StdVideoDecodeH264ReferenceInfo", VIDEO_H264_DECODE_H),
    ("StdVideoDecodeH264ReferenceInfoFlags", VIDEO_H264_DECODE_H),
    ("StdVideoDecodeH265PictureInfo", VIDEO_H265_DECODE_H),
    ("StdVideoDecodeH265PictureInfoFlags", VIDEO_H265_DECODE_H),
    ("StdVideoDecodeH265ReferenceInfo", VIDEO_H265_DECODE_H),
    ("StdVideoDecodeH265ReferenceInfoFlags", VIDEO_H265_DECODE_H),
    ("StdVideoEncodeH264PictureInfo", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264PictureInfoFlags", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264RefListModEntry", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264RefMemMgmtCtrlOperations", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264RefMgmtFlags", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264RefPicMarkingEntry", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264ReferenceInfo", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264ReferenceListsInfo", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264ReferenceInfoFlags", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264SliceHeader", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH264SliceHeaderFlags", VIDEO_H264_ENCODE_H),
    ("StdVideoEncodeH265PictureInfo", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265PictureInfoFlags", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265ReferenceInfo", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265ReferenceListsInfo", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265ReferenceInfoFlags", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265ReferenceModificationFlags", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265ReferenceModifications", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265SliceHeader", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265SliceHeaderFlags", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265SliceSegmentHeader", VIDEO_H265_ENCODE_H),
    ("StdVideoEncodeH265SliceSegmentHeaderFlags", VIDEO_H265_ENCODE_H),
    ("StdVideoH264AspectRatioIdc", VIDEO_H264_H),
    ("StdVideoH264CabacInitIdc", VIDEO_H264_H),
    ("StdVideoH264ChromaFormatIdc", VIDEO_H264_H),
    ("StdVideoH264DisableDeblockingFilterIdc", VIDEO_H264_H),
    ("StdVideoH264HrdParameters", VIDEO_H264_H),
    ("StdVideoH264Level", VIDEO_H264_H),
    ("StdVideoH264LevelIdc", VIDEO_H264_H),
    ("StdVideoH264MemMgmtControlOp", VIDEO_H264_H),
    ("StdVideoH264ModificationOfPicNumsIdc", VIDEO_H264_H),
    ("StdVideoH264PictureParameterSet", VIDEO_H264_H),
    ("StdVideoH264PictureType", VIDEO_H264_H),
    ("StdVideoH264PocType", VIDEO_H264_H),
    ("StdVideoH264PpsFlags", VIDEO_H264_H),
    ("StdVideoH264ProfileIdc", VIDEO_H264_H),
    ("StdVideoH264ScalingLists", VIDEO_H264_H),
    ("StdVideoH264SequenceParameterSet", VIDEO_H264_H),
    ("StdVideoH264SequenceParameterSetVui", VIDEO_H264_H),
    ("StdVideoH264SliceType", VIDEO_H264_H),
    ("StdVideoH264SpsFlags", VIDEO_H264_H),
    ("StdVideoH264SpsVuiFlags", VIDEO_H264_H),
    ("StdVideoH264WeightedBiPredIdc", VIDEO_H264_H),
    ("StdVideoH264WeightedBipredIdc", VIDEO_H264_H),
    ("StdVideoH265PictureParameterSet", VIDEO_H265_H),
    ("StdVideoH265DecPicBufMgr", VIDEO_H265_H),
    ("StdVideoH265HrdFlags", VIDEO_H265_H),
    ("StdVideoH265HrdParameters", VIDEO_H265_H),
    ("StdVideoH265Level", VIDEO_H265_H),
    ("StdVideoH265LevelIdc", VIDEO_H265_H),
    ("StdVideoH265PictureType", VIDEO_H265_H),
    ("StdVideoH265PpsFlags", VIDEO_H265_H),
    ("StdVideoH265PredictorPaletteEntries", VIDEO_H265_H),
    ("StdVideoH265ProfileIdc", VIDEO_H265_H),
    ("StdVideoH265ScalingLists", VIDEO_H265_H),
    ("StdVideoH265SequenceParameterSet", VIDEO_H265_H),
    ("StdVideoH265SequenceParameterSetVui", VIDEO_H265_H),
    ("StdVideoH265SliceType", VIDEO_H265_H),
    ("StdVideoH265SpsFlags", VIDEO_H265_H),
    ("StdVideoH265SpsVuiFlags", VIDEO_H265_H),
    ("StdVideoH265SubLayerHrdParameters", VIDEO_H265_H),
    ("StdVideoH265VideoParameterSet", VIDEO_H265_H),
    ("StdVideoH265VpsFlags", VIDEO_H265_H),
    ("StdVideoAV1Profile", VIDEO_AV1_H),
    ("StdVideoAV1Level", VIDEO_AV1_H),
    ("StdVideoAV1SequenceHeader", VIDEO_AV1_H),
    ("StdVideoDecodeAV1PictureInfo", VIDEO_AV1_DECODE_H),
    ("StdVideoDecodeAV1ReferenceInfo", VIDEO_AV1_DECODE_H),
    ("uint8_t", "vk_platform"),
    ("uint16_t", "vk_platform"),
    ("uint32_t", "vk_platform"),
    ("uint64_t", "vk_platform"),
    ("VisualID", "X11/Xlib.h"),
    ("void", "vk_platform"),
    ("Window", "X11/Xlib.h"),
    ("wl_display", "wayland-client.h"),
    ("wl_surface", "wayland-client.h"),
    ("xcb_connection_t", "xcb/xcb.h"),
    ("xcb_visualid_t", "xcb/xcb.h"),
    ("xcb_window_t", "xcb/xcb.h"),
    ("zx_handle_t", "zircon/types.h"),
];

// Codec structs treated as opaque for now; nothing dereferences them.
const OPAQUE_SEEDS: &[&str] = &[
    "_screen_context",
    "_screen_window",
    "_screen_buffer",
    "StdVideoDecodeH264Mvc",
    "StdVideoDecodeH264MvcElement",
    "StdVideoDecodeH264PictureInfo",
    "StdVideoDecodeH264ReferenceInfo",
    "StdVideoDecodeH265PictureInfo",
    "StdVideoDecodeH265ReferenceInfo",
    "StdVideoEncodeH264PictureInfo",
    "StdVideoEncodeH264RefListModEntry",
    "StdVideoEncodeH264RefMemMgmtCtrlOperations",
    "StdVideoEncodeH264RefPicMarkingEntry",
    "StdVideoEncodeH264ReferenceInfo",
    "StdVideoEncodeH264ReferenceListsInfo",
    "StdVideoEncodeH264SliceHeader",
    "StdVideoEncodeH265PictureInfo",
    "StdVideoEncodeH265ReferenceInfo",
    "StdVideoEncodeH265ReferenceListsInfo",
    "StdVideoEncodeH265ReferenceModifications",
    "StdVideoEncodeH265SliceHeader",
    "StdVideoEncodeH265SliceSegmentHeader",
    "StdVideoEncodeH265SliceSegmentHeaderFlags",
    "StdVideoH264HrdParameters",
    "StdVideoH264PictureParameterSet",
    "StdVideoH264ScalingLists",
    "StdVideoH264SequenceParameterSet",
    "StdVideoH264SequenceParameterSetVui",
    "StdVideoH265PictureParameterSet",
    "StdVideoH265DecPicBufMgr",
    "StdVideoH265HrdFlags",
    "StdVideoH265HrdParameters",
    "StdVideoH265Level",
    "StdVideoH265PpsFlags",
    "StdVideoH265PredictorPaletteEntries",
    "StdVideoH265ScalingLists",
    "StdVideoH265SequenceParameterSet",
    "StdVideoH265SequenceParameterSetVui",
    "StdVideoH265SubLayerHrdParameters",
    "StdVideoH265VideoParameterSet",
    "StdVideoH265VpsFlags",
    "StdVideoAV1SequenceHeader",
    "StdVideoDecodeAV1PictureInfo",
    "StdVideoDecodeAV1ReferenceInfo",
];

// Codec enums, and flag structs whose bitfields are int32-compatible.
const INT_SEEDS: &[&str] = &[
    "NvSciSyncAttrList",
    "NvSciSyncObj",
    "NvSciSyncFence",
    "NvSciBufAttrList",
    "NvSciBufObj",
    "StdVideoDecodeH264MvcElementFlags",
    "StdVideoDecodeH264PictureInfoFlags",
    "StdVideoDecodeH264ReferenceInfoFlags",
    "StdVideoDecodeH265PictureInfoFlags",
    "StdVideoDecodeH265ReferenceInfoFlags",
    "StdVideoEncodeH264PictureInfoFlags",
    "StdVideoEncodeH264RefMgmtFlags",
    "StdVideoEncodeH264ReferenceInfoFlags",
    "StdVideoEncodeH264SliceHeaderFlags",
    "StdVideoEncodeH265PictureInfoFlags",
    "StdVideoEncodeH265ReferenceInfoFlags",
    "StdVideoEncodeH265ReferenceModificationFlags",
    "StdVideoEncodeH265SliceHeaderFlags",
    "StdVideoH264AspectRatioIdc",
    "StdVideoH264CabacInitIdc",
    "StdVideoH264ChromaFormatIdc",
    "StdVideoH264DisableDeblockingFilterIdc",
    "StdVideoH264Level",
    "StdVideoH264LevelIdc",
    "StdVideoH264MemMgmtControlOp",
    "StdVideoH264ModificationOfPicNumsIdc",
    "StdVideoH264PictureType",
    "StdVideoH264PocType",
    "StdVideoH264PpsFlags",
    "StdVideoH264ProfileIdc",
    "StdVideoH264SliceType",
    "StdVideoH264SpsFlags",
    "StdVideoH264SpsVuiFlags",
    "StdVideoH264WeightedBiPredIdc",
    "StdVideoH264WeightedBipredIdc",
    "StdVideoH265LevelIdc",
    "StdVideoH265PictureType",
    "StdVideoH265ProfileIdc",
    "StdVideoH265SliceType",
    "StdVideoH265SpsFlags",
    "StdVideoH265SpsVuiFlags",
    "StdVideoAV1Profile",
    "StdVideoAV1Level",
    "StdVideoDecodeAV1ReferenceInfoFlags",
];

/// Seeds a fresh type map with every platform type.
pub fn platform_types(store: &mut TypeStore) -> BTreeMap<String, TypeId> {
    let mut types = BTreeMap::new();
    let put = |types: &mut BTreeMap<String, TypeId>, name: &str, id: TypeId| {
        types.insert(name.to_string(), id);
    };

    let void = store.primitive(Kind::Void);
    let int_ = store.primitive(Kind::Int);
    let uint32_t = store.primitive(Kind::UInt32);
    let uint64_t = store.primitive(Kind::UInt64);
    let ulong = store.primitive(Kind::ULong);

    for name in OPAQUE_SEEDS {
        put(&mut types, name, void);
    }
    for name in INT_SEEDS {
        put(&mut types, name, int_);
    }

    put(&mut types, "void", void);
    put(&mut types, "char", store.primitive(Kind::Char));
    put(&mut types, "float", store.primitive(Kind::Float32));
    put(&mut types, "double", store.primitive(Kind::Float64));
    put(&mut types, "int", int_);
    put(&mut types, "int8_t", store.primitive(Kind::Int8));
    put(&mut types, "int16_t", store.primitive(Kind::Int16));
    put(&mut types, "int32_t", store.primitive(Kind::Int32));
    put(&mut types, "int64_t", store.primitive(Kind::Int64));
    put(&mut types, "uint8_t", store.primitive(Kind::UInt8));
    put(&mut types, "uint16_t", store.primitive(Kind::UInt16));
    put(&mut types, "uint32_t", uint32_t);
    put(&mut types, "uint64_t", uint64_t);
    put(&mut types, "size_t", store.primitive(Kind::SizeT));

    put(&mut types, "Display", store.opaque("Display"));
    put(&mut types, "DWORD", store.alias("DWORD", uint32_t));
    put(
        &mut types,
        "GgpFrameToken",
        store.alias("GgpFrameToken", uint64_t),
    );
    put(
        &mut types,
        "GgpStreamDescriptor",
        store.alias("GgpStreamDescriptor", uint32_t),
    );

    let handle = {
        let pointer = store.pointer(void);
        store.alias("HANDLE", pointer)
    };
    put(&mut types, "HANDLE", handle);
    put(&mut types, "HINSTANCE", store.alias("HINSTANCE", handle));
    put(&mut types, "HMONITOR", store.alias("HMONITOR", handle));
    put(&mut types, "HWND", store.alias("HWND", handle));

    // These would need conversion like the GLES/SLES variants, but
    // DirectFB is not supported on Android.
    let idirectfb = {
        let opaque = store.opaque("struct IDirectFB");
        store.alias("IDirectFB", opaque)
    };
    put(&mut types, "IDirectFB", idirectfb);
    let idirectfb_surface = {
        let opaque = store.opaque("struct IDirectFBSurface");
        store.alias("IDirectFBSurface", opaque)
    };
    put(&mut types, "IDirectFBSurface", idirectfb_surface);

    // LPCWSTR is Windows's 16-bit wchar_t string, but wchar_t is 32 bits
    // on Linux; char16_t has the same layout on every platform.
    let lpcwstr = {
        let char16 = store.primitive(Kind::Char16);
        let const_char16 = store.const_of(char16);
        let pointer = store.pointer(const_char16);
        store.alias("LPCWSTR", pointer)
    };
    put(&mut types, "LPCWSTR", lpcwstr);

    let xid = store.alias("XID", ulong);
    put(&mut types, "XID", xid);
    put(&mut types, "RROutput", store.alias("RROutput", xid));
    put(&mut types, "Window", store.alias("Window", xid));
    put(&mut types, "VisualID", store.alias("VisualID", ulong));

    put(
        &mut types,
        "SECURITY_ATTRIBUTES",
        store.opaque("SECURITY_ATTRIBUTES"),
    );
    put(&mut types, "wl_display", store.opaque("wl_display"));
    put(&mut types, "wl_surface", store.opaque("wl_surface"));
    put(
        &mut types,
        "xcb_connection_t",
        store.opaque("xcb_connection_t"),
    );
    put(
        &mut types,
        "xcb_visualid_t",
        store.alias("xcb_visualid_t", uint32_t),
    );
    put(
        &mut types,
        "xcb_window_t",
        store.alias("xcb_window_t", uint32_t),
    );
    put(
        &mut types,
        "zx_handle_t",
        store.alias("zx_handle_t", uint32_t),
    );

    types
}

/// Whether `id` has the dispatchable handle shape (an alias of a pointer
/// to the opaque `struct <Name>_T`) on every architecture.
pub fn is_vulkan_handle(store: &TypeStore, id: TypeId) -> bool {
    Arch::ALL.iter().all(|&arch| handle_shape(store, id, arch))
}

/// Whether `id` has the non-dispatchable handle shape: an alias of
/// `uint64_t` on the 32-bit architectures and the dispatchable pointer
/// shape on the 64-bit ones.
pub fn is_vulkan_nondispatchable_handle(store: &TypeStore, id: TypeId) -> bool {
    Arch::ALL.iter().all(|&arch| {
        if arch.ptr_bits() == 32 {
            store.kind(id, arch) == Kind::Alias
                && store.kind(store.elem(id, arch), arch) == Kind::UInt64
        } else {
            handle_shape(store, id, arch)
        }
    })
}

fn handle_shape(store: &TypeStore, id: TypeId, arch: Arch) -> bool {
    if store.kind(id, arch) != Kind::Alias {
        return false;
    }
    let pointer = store.elem(id, arch);
    if store.kind(pointer, arch) != Kind::Ptr {
        return false;
    }
    let pointee = store.elem(pointer, arch);
    store.kind(pointee, arch) == Kind::Opaque
        && store.name(pointee, arch) == format!("struct {}_T", store.name(id, arch))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_required_header_entry_is_seeded() {
        let mut store = TypeStore::new();
        let types = platform_types(&mut store);
        for (name, _) in REQUIRED_HEADERS {
            assert!(types.contains_key(*name), "{name} missing from seed");
        }
    }

    #[test]
    fn handle_shapes() {
        let mut store = TypeStore::new();
        let dispatchable = {
            let opaque = store.opaque("struct VkInstance_T");
            let pointer = store.pointer(opaque);
            store.alias("VkInstance", pointer)
        };
        assert!(is_vulkan_handle(&store, dispatchable));
        assert!(!is_vulkan_nondispatchable_handle(&store, dispatchable));

        let uint64_t = store.primitive(Kind::UInt64);
        let narrow = store.alias("VkFence", uint64_t);
        let wide = {
            let opaque = store.opaque("struct VkFence_T");
            let pointer = store.pointer(opaque);
            store.alias("VkFence", pointer)
        };
        let nondispatchable =
            store.arch_dependent([narrow, wide, narrow, wide, narrow, wide]);
        assert!(is_vulkan_nondispatchable_handle(&store, nondispatchable));
        assert!(!is_vulkan_handle(&store, nondispatchable));

        let u32t = store.primitive(Kind::UInt32);
        let plain = store.alias("VkFlags", u32t);
        assert!(!is_vulkan_handle(&store, plain));
        assert!(!is_vulkan_nondispatchable_handle(&store, plain));
    }
}
