use vk_abi::{
    is_vulkan_handle, is_vulkan_nondispatchable_handle, load_registry, Arch, Catalog, Kind,
    LenPath, LoadError,
};

fn load(xml: &str) -> Catalog {
    load_registry(xml.as_bytes()).expect("registry should load")
}

fn load_err(xml: &str) -> LoadError {
    load_registry(xml.as_bytes()).expect_err("registry should be rejected")
}

#[test]
fn type_without_category_must_be_a_known_platform_type() {
    let error = load_err(
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <registry>
            <types>
                <type name="Foo"/>
            </types>
        </registry>"#,
    );
    assert!(matches!(error, LoadError::UnknownType { name, .. } if name == "Foo"));

    // Right name but wrong requires header is rejected too.
    let error = load_err(
        r#"<registry>
            <types>
                <type name="wl_display" requires="somewhere-else.h"/>
            </types>
        </registry>"#,
    );
    assert!(matches!(error, LoadError::UnknownType { .. }));

    load(
        r#"<registry>
            <types>
                <type name="wl_display" requires="wayland-client.h"/>
                <type name="int"/>
            </types>
        </registry>"#,
    );
}

#[test]
fn enum_warts_are_tolerated() {
    // vk.xml abuses <enum> for non-integer constants; they must not fail
    // the load just by existing.
    load(
        r#"<registry>
            <enums name="API Constants">
                <enum value="1000.0f" name="VK_LOD_CLAMP_NONE"/>
                <enum value="0" name="VK_FALSE"/>
            </enums>
            <feature api="vulkan" name="VK_VERSION_1_0" number="1.0">
                <require comment="API constants">
                    <enum name="VK_FALSE"/>
                </require>
            </feature>
        </registry>"#,
    );
}

#[test]
fn enums_extended_by_features_and_extensions() {
    let catalog = load(
        r#"<registry>
            <types>
                <type name="VkStructureType" category="enum"/>
            </types>
            <feature api="vulkan" name="VK_VERSION_1_1" number="1.1">
                <require>
                    <enum extends="VkStructureType" extnumber="158" offset="1" name="VK_STRUCTURE_TYPE_BIND_IMAGE_MEMORY_INFO"/>
                </require>
            </feature>
            <extensions>
                <extension name="VK_KHR_swapchain" number="2">
                    <require>
                        <enum value="70" name="VK_KHR_SWAPCHAIN_SPEC_VERSION"/>
                        <enum offset="1" extends="VkStructureType" name="VK_STRUCTURE_TYPE_PRESENT_INFO_KHR"/>
                    </require>
                </extension>
            </extensions>
        </registry>"#,
    );
    assert_eq!(catalog.extensions().get("VK_KHR_swapchain"), Some(&70));

    let store = catalog.store();
    let id = catalog.type_named("VkStructureType").unwrap();
    for arch in Arch::ALL {
        assert_eq!(store.kind(id, arch), Kind::Enum);
        assert_eq!(store.kind(store.elem(id, arch), arch), Kind::Int32);
        assert_eq!(store.num_fields(id, arch), 2);
        let first = store.field(id, 0, arch);
        assert_eq!(first.name(), "VK_STRUCTURE_TYPE_BIND_IMAGE_MEMORY_INFO");
        assert_eq!(first.value(), 1_000_157_001);
        let second = store.field(id, 1, arch);
        assert_eq!(second.name(), "VK_STRUCTURE_TYPE_PRESENT_INFO_KHR");
        assert_eq!(second.value(), 1_000_001_001);
    }
}

#[test]
fn enum_underlying_type_is_the_smallest_that_fits() {
    let catalog = load(
        r#"<registry>
            <types>
                <type name="VkImageCreateFlagBits" category="enum"/>
                <type name="Vk64BitEnum" category="enum"/>
                <type name="VkSmallEnum" category="enum"/>
            </types>
            <enums name="VkImageCreateFlagBits" type="enum">
                <enum bitpos="31" name="VK_IMAGE_RESERVED_31_BIT"/>
            </enums>
            <enums name="Vk64BitEnum" type="enum">
                <enum value="0x100000000" name="VK_64_BIT_ENUM_TEST_VALUE"/>
            </enums>
            <enums name="VkSmallEnum" type="enum">
                <enum value="-7" name="VK_SMALL_NEGATIVE"/>
            </enums>
        </registry>"#,
    );
    let store = catalog.store();

    let flags = catalog.type_named("VkImageCreateFlagBits").unwrap();
    assert_eq!(store.kind(store.elem(flags, Arch::Arm), Arch::Arm), Kind::UInt32);
    assert_eq!(store.field(flags, 0, Arch::Arm).value(), 0x8000_0000);

    let wide = catalog.type_named("Vk64BitEnum").unwrap();
    assert_eq!(store.kind(store.elem(wide, Arch::Arm), Arch::Arm), Kind::Int64);
    assert_eq!(store.field(wide, 0, Arch::Arm).value(), 0x1_0000_0000);

    let small = catalog.type_named("VkSmallEnum").unwrap();
    assert_eq!(store.kind(store.elem(small, Arch::Arm), Arch::Arm), Kind::Int32);
    assert_eq!(store.field(small, 0, Arch::Arm).value(), -7);
}

#[test]
fn dispatchable_handles_are_pointer_aliases() {
    let catalog = load(
        r#"<registry>
            <types>
                <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkInstance</name>)</type>
            </types>
        </registry>"#,
    );
    let store = catalog.store();
    let id = catalog.type_named("VkInstance").unwrap();
    for arch in Arch::ALL {
        assert_eq!(store.kind(id, arch), Kind::Alias);
        let pointer = store.elem(id, arch);
        assert_eq!(store.kind(pointer, arch), Kind::Ptr);
        let pointee = store.elem(pointer, arch);
        assert_eq!(store.kind(pointee, arch), Kind::Opaque);
        assert_eq!(store.name(pointee, arch), "struct VkInstance_T");
    }
    assert!(is_vulkan_handle(store, id));
    assert!(!is_vulkan_nondispatchable_handle(store, id));
}

#[test]
fn nondispatchable_handles_depend_on_pointer_width() {
    let catalog = load(
        r#"<registry>
            <types>
                <type category="handle"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkFence</name>)</type>
            </types>
        </registry>"#,
    );
    let store = catalog.store();
    let id = catalog.type_named("VkFence").unwrap();
    for arch in Arch::ALL {
        assert_eq!(store.kind(id, arch), Kind::Alias);
        let base = store.elem(id, arch);
        if arch.ptr_bits() == 32 {
            assert_eq!(store.kind(base, arch), Kind::UInt64);
        } else {
            assert_eq!(store.kind(base, arch), Kind::Ptr);
            assert_eq!(store.kind(store.elem(base, arch), arch), Kind::Opaque);
        }
    }
    assert!(is_vulkan_nondispatchable_handle(store, id));
    assert!(!is_vulkan_handle(store, id));
}

#[test]
fn function_pointers() {
    let catalog = load(
        r#"<registry>
            <types>
                <type category="funcpointer">typedef void (VKAPI_PTR *<name>PFN_vkVoidFunction</name>)(void);</type>
                <type category="funcpointer" requires="VkDebugUtilsMessengerCallbackDataEXT">
                    typedef uint32_t (VKAPI_PTR *<name>PFN_vkDebugUtilsMessengerCallbackEXT</name>)(
                        <type>uint8_t</type>                                          pIndex,
                        const <type>VkDebugUtilsMessengerCallbackDataEXT</type>*      pCallbackData,
                        <type>void</type>*                                            pUserData);
                </type>
            </types>
        </registry>"#,
    );
    let store = catalog.store();

    let void_fn = catalog.type_named("PFN_vkVoidFunction").unwrap();
    for arch in Arch::ALL {
        assert_eq!(store.kind(void_fn, arch), Kind::Ptr);
        let function = store.elem(void_fn, arch);
        assert_eq!(store.kind(function, arch), Kind::Func);
        assert_eq!(store.kind(store.elem(function, arch), arch), Kind::Void);
        assert_eq!(store.num_fields(function, arch), 0);
    }

    let callback = catalog
        .type_named("PFN_vkDebugUtilsMessengerCallbackEXT")
        .unwrap();
    for arch in Arch::ALL {
        let function = store.elem(callback, arch);
        assert_eq!(store.kind(function, arch), Kind::Func);
        assert_eq!(store.kind(store.elem(function, arch), arch), Kind::UInt32);
        assert_eq!(store.num_fields(function, arch), 3);

        let index = store.field(function, 0, arch);
        assert_eq!(index.name(), "pIndex");
        assert_eq!(store.kind(index.ty(), arch), Kind::UInt8);

        // The callback data struct is never declared, so its pointee
        // stays a const opaque placeholder.
        let data = store.field(function, 1, arch);
        assert_eq!(data.name(), "pCallbackData");
        assert_eq!(store.kind(data.ty(), arch), Kind::Ptr);
        let pointee = store.elem(data.ty(), arch);
        assert_eq!(store.kind(pointee, arch), Kind::Const);
        let inner = store.elem(pointee, arch);
        assert_eq!(store.kind(inner, arch), Kind::Opaque);
        assert_eq!(
            store.name(inner, arch),
            "VkDebugUtilsMessengerCallbackDataEXT"
        );

        let user_data = store.field(function, 2, arch);
        assert_eq!(user_data.name(), "pUserData");
        assert_eq!(store.kind(user_data.ty(), arch), Kind::Ptr);
        assert_eq!(store.kind(store.elem(user_data.ty(), arch), arch), Kind::Void);
    }
}

const STRUCT_REGISTRY: &str = r#"<registry>
    <types>
        <type category="basetype">typedef <type>uint32_t</type> <name>VkFlags</name>;</type>
        <type name="VkStructureType" category="enum"/>
        <type requires="VkGeometryInstanceFlagBitsKHR" category="bitmask">typedef <type>VkFlags</type> <name>VkGeometryInstanceFlagsKHR</name>;</type>
        <type category="struct" name="VkBaseOutStructure">
            <member><type>VkStructureType</type> <name>sType</name></member>
            <member>struct <type>VkBaseOutStructure</type>* <name>pNext</name></member>
        </type>
        <type category="struct" name="VkBaseInStructure">
            <member><type>VkStructureType</type> <name>sType</name></member>
            <member>const struct <type>VkBaseInStructure</type>* <name>pNext</name></member>
        </type>
        <type category="struct" name="VkAccelerationStructureInstanceKHR">
            <comment>The bitfields in this structure are non-normative since bitfield ordering is implementation-defined in C. The specification defines the normative layout.</comment>
            <member><type>VkTransformMatrixKHR</type> <name>transform</name></member>
            <member><type>uint32_t</type> <name>instanceCustomIndex</name>:24</member>
            <member><type>uint32_t</type> <name>mask</name>:8</member>
            <member><type>uint32_t</type> <name>instanceShaderBindingTableRecordOffset</name>:24</member>
            <member optional="true"><type>VkGeometryInstanceFlagsKHR</type> <name>flags</name>:8</member>
            <member><type>uint64_t</type> <name>accelerationStructureReference</name></member>
        </type>
        <type category="struct" name="VkTransformMatrixKHR">
            <member><type>float</type> <name>matrix</name>[3][4]</member>
        </type>
    </types>
</registry>"#;

#[test]
fn forward_referenced_pointees_are_patched() {
    let catalog = load(STRUCT_REGISTRY);
    let store = catalog.store();

    let out = catalog.type_named("VkBaseOutStructure").unwrap();
    for arch in Arch::ALL {
        assert_eq!(store.kind(out, arch), Kind::Struct);
        assert_eq!(store.num_fields(out, arch), 2);
        let next = store.field(out, 1, arch);
        assert_eq!(next.name(), "pNext");
        assert_eq!(store.kind(next.ty(), arch), Kind::Ptr);
        assert_eq!(store.kind(store.elem(next.ty(), arch), arch), Kind::Struct);
    }

    let input = catalog.type_named("VkBaseInStructure").unwrap();
    for arch in Arch::ALL {
        let next = store.field(input, 1, arch);
        let pointee = store.elem(next.ty(), arch);
        assert_eq!(store.kind(pointee, arch), Kind::Const);
        assert_eq!(store.kind(store.elem(pointee, arch), arch), Kind::Struct);
        assert_eq!(
            store.name(store.elem(pointee, arch), arch),
            "struct VkBaseInStructure"
        );
    }
}

#[test]
fn no_opaque_pointee_names_a_catalog_struct_after_loading() {
    let catalog = load(STRUCT_REGISTRY);
    let store = catalog.store();
    for name in catalog.sorted_type_names() {
        let mut id = catalog.type_named(name).unwrap();
        if store.kind(id, Arch::Arm) == Kind::Ptr {
            id = store.elem(id, Arch::Arm);
        }
        match store.kind(id, Arch::Arm) {
            Kind::Struct | Kind::Union | Kind::Func => {}
            _ => continue,
        }
        for i in 0..store.num_fields(id, Arch::Arm) {
            let ty = store.field(id, i, Arch::Arm).ty();
            if store.kind(ty, Arch::Arm) != Kind::Ptr {
                continue;
            }
            let mut pointee = store.elem(ty, Arch::Arm);
            if store.kind(pointee, Arch::Arm) == Kind::Const {
                pointee = store.elem(pointee, Arch::Arm);
            }
            if store.kind(pointee, Arch::Arm) != Kind::Opaque {
                continue;
            }
            let pointee_name = store.name(pointee, Arch::Arm);
            if let Some(target) = catalog.type_named(&pointee_name) {
                assert_ne!(
                    store.kind(target, Arch::Arm),
                    Kind::Struct,
                    "{name} still points at opaque {pointee_name}"
                );
            }
        }
    }
}

#[test]
fn bitfields_are_rewritten_to_the_normative_layout() {
    let catalog = load(STRUCT_REGISTRY);
    let store = catalog.store();

    let matrix = catalog.type_named("VkTransformMatrixKHR").unwrap();
    for arch in Arch::ALL {
        let field = store.field(matrix, 0, arch);
        assert_eq!(field.name(), "matrix");
        assert_eq!(store.kind(field.ty(), arch), Kind::Array);
        assert_eq!(store.num_fields(field.ty(), arch), 4);
        let inner = store.elem(field.ty(), arch);
        assert_eq!(store.kind(inner, arch), Kind::Array);
        assert_eq!(store.num_fields(inner, arch), 3);
        assert_eq!(store.kind(store.elem(inner, arch), arch), Kind::Float32);
    }

    let instance = catalog
        .type_named("VkAccelerationStructureInstanceKHR")
        .unwrap();
    for arch in Arch::ALL {
        assert_eq!(store.kind(instance, arch), Kind::Struct);
        assert_eq!(store.num_fields(instance, arch), 6);
        let expect = [
            ("transform", 384, 0),
            ("instanceCustomIndex", 24, 384),
            ("mask", 8, 408),
            ("instanceShaderBindingTableRecordOffset", 24, 416),
            ("flags", 8, 440),
            ("accelerationStructureReference", 64, 448),
        ];
        for (i, (name, bits, offset)) in expect.iter().enumerate() {
            let field = store.field(instance, i, arch);
            assert_eq!(field.name(), *name);
            assert_eq!(store.bits(field.ty(), arch), *bits, "{name} on {arch:?}");
            assert_eq!(field.offset(), *offset, "{name} on {arch:?}");
        }
        let flags = store.field(instance, 4, arch);
        assert!(flags.ext().optional);
    }
}

#[test]
fn command_array_parameters_decay_with_length_attached() {
    let catalog = load(
        r#"<registry>
            <types>
                <type category="define">
#define <name>VK_DEFINE_HANDLE</name>(object) typedef struct object##_T* object;</type>
                <type category="handle" parent="VkCommandPool"><type>VK_DEFINE_HANDLE</type>(<name>VkCommandBuffer</name>)</type>
            </types>
            <commands>
                <command queues="graphics" renderpass="both" cmdbufferlevel="primary,secondary">
                    <proto><type>void</type> <name>vkCmdSetBlendConstants</name></proto>
                    <param externsync="true"><type>VkCommandBuffer</type> <name>commandBuffer</name></param>
                    <param><type>uint32_t</type> <name>blendConstantsLen</name></param>
                    <param len="blendConstantsLen">const <type>float</type> <name>blendConstants</name>[4]</param>
                </command>
            </commands>
        </registry>"#,
    );
    let store = catalog.store();
    let command = catalog.command_named("vkCmdSetBlendConstants").unwrap();
    for arch in Arch::ALL {
        assert_eq!(store.kind(command, arch), Kind::Func);
        assert_eq!(store.kind(store.elem(command, arch), arch), Kind::Void);
        assert_eq!(store.num_fields(command, arch), 3);

        let buffer = store.field(command, 0, arch);
        assert_eq!(buffer.name(), "commandBuffer");
        assert_eq!(store.kind(buffer.ty(), arch), Kind::Alias);

        let constants = store.field(command, 2, arch);
        assert_eq!(constants.name(), "blendConstants");
        assert_eq!(store.kind(constants.ty(), arch), Kind::Ptr);
        let pointee = store.elem(constants.ty(), arch);
        assert_eq!(store.kind(pointee, arch), Kind::Const);
        assert_eq!(store.kind(store.elem(pointee, arch), arch), Kind::Float32);
        assert_eq!(constants.ext().length, Some(LenPath::Field(1)));
    }
}

#[test]
fn nested_length_paths_resolve_into_the_pointed_to_struct() {
    let catalog = load(
        r#"<registry>
            <types>
                <type category="define">
#define <name>VK_DEFINE_HANDLE</name>(object) typedef struct object##_T* object;</type>
                <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkDescriptorPool</name>)</type>
                <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkDescriptorSet</name>)</type>
                <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkDescriptorSetLayout</name>)</type>
                <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkDevice</name>)</type>
                <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkStructureType</name>)</type>
                <type category="struct" name="VkDescriptorSetAllocateInfo">
                    <member values="VK_STRUCTURE_TYPE_DESCRIPTOR_SET_ALLOCATE_INFO"><type>VkStructureType</type> <name>sType</name></member>
                    <member optional="true">const <type>void</type>* <name>pNext</name></member>
                    <member><type>VkDescriptorPool</type> <name>descriptorPool</name></member>
                    <member><type>uint32_t</type> <name>descriptorSetCount</name></member>
                    <member len="descriptorSetCount">const <type>VkDescriptorSetLayout</type>* <name>pSetLayouts</name></member>
                </type>
            </types>
            <commands>
                <command successcodes="VK_SUCCESS">
                    <proto><type>void</type> <name>vkAllocateDescriptorSets</name></proto>
                    <param><type>VkDevice</type> <name>device</name></param>
                    <param externsync="pAllocateInfo-&gt;descriptorPool">const <type>VkDescriptorSetAllocateInfo</type>* <name>pAllocateInfo</name></param>
                    <param len="pAllocateInfo-&gt;descriptorSetCount"><type>VkDescriptorSet</type>* <name>pDescriptorSets</name></param>
                </command>
            </commands>
        </registry>"#,
    );
    let store = catalog.store();
    let command = catalog.command_named("vkAllocateDescriptorSets").unwrap();
    for arch in Arch::ALL {
        let info = store.field(command, 1, arch);
        assert_eq!(info.name(), "pAllocateInfo");
        let pointee = store.elem(info.ty(), arch);
        assert_eq!(store.kind(pointee, arch), Kind::Const);
        assert_eq!(
            store.name(store.elem(pointee, arch), arch),
            "struct VkDescriptorSetAllocateInfo"
        );

        let sets = store.field(command, 2, arch);
        assert_eq!(sets.name(), "pDescriptorSets");
        assert_eq!(
            sets.ext().length,
            Some(LenPath::Nested { field: 1, inner: 3 })
        );

        // The inner index names descriptorSetCount inside the struct.
        let info_struct = catalog.type_named("VkDescriptorSetAllocateInfo").unwrap();
        assert_eq!(
            store.field(info_struct, 3, arch).name(),
            "descriptorSetCount"
        );
    }

    // The struct-level length inside VkDescriptorSetAllocateInfo also
    // resolved to its sibling count field.
    let info_struct = catalog.type_named("VkDescriptorSetAllocateInfo").unwrap();
    let layouts = store.field(info_struct, 4, Arch::Arm);
    assert_eq!(layouts.ext().length, Some(LenPath::Field(3)));
}

#[test]
fn struct_extension_chains_are_recorded() {
    let catalog = load(
        r#"<registry>
            <types>
                <type name="VkStructureType" category="enum"/>
                <type category="struct" name="VkDeviceCreateInfo">
                    <member values="VK_STRUCTURE_TYPE_DEVICE_CREATE_INFO"><type>VkStructureType</type> <name>sType</name></member>
                    <member optional="true">const <type>void</type>* <name>pNext</name></member>
                </type>
                <type category="struct" name="VkDeviceExtraInfo" structextends="VkDeviceCreateInfo,VkOtherInfo">
                    <member values="VK_STRUCTURE_TYPE_DEVICE_EXTRA_INFO"><type>VkStructureType</type> <name>sType</name></member>
                    <member optional="true">const <type>void</type>* <name>pNext</name></member>
                    <member><type>uint32_t</type> <name>extra</name></member>
                </type>
                <type category="struct" name="VkRealOtherInfo">
                    <member values="VK_STRUCTURE_TYPE_OTHER"><type>VkStructureType</type> <name>sType</name></member>
                    <member optional="true">const <type>void</type>* <name>pNext</name></member>
                </type>
                <type name="VkOtherInfo" alias="VkRealOtherInfo" category="struct"/>
            </types>
        </registry>"#,
    );
    let extension = catalog.type_named("VkDeviceExtraInfo").unwrap();

    let info = catalog.struct_info("VkDeviceExtraInfo").unwrap();
    assert!(info.extends);
    assert_eq!(
        info.stype_value.as_deref(),
        Some("VK_STRUCTURE_TYPE_DEVICE_EXTRA_INFO")
    );

    let target = catalog.struct_info("VkDeviceCreateInfo").unwrap();
    assert_eq!(target.extended_with, vec![extension]);

    // The second target is reached through an alias and lands on the
    // underlying struct.
    let aliased = catalog.struct_info("VkRealOtherInfo").unwrap();
    assert_eq!(aliased.extended_with, vec![extension]);
}

#[test]
fn extension_structs_must_start_with_stype_and_pnext() {
    let error = load_err(
        r#"<registry>
            <types>
                <type name="VkStructureType" category="enum"/>
                <type category="struct" name="VkTarget">
                    <member values="X"><type>VkStructureType</type> <name>sType</name></member>
                    <member optional="true">const <type>void</type>* <name>pNext</name></member>
                </type>
                <type category="struct" name="VkBadExtension" structextends="VkTarget">
                    <member><type>uint32_t</type> <name>first</name></member>
                    <member><type>uint32_t</type> <name>second</name></member>
                </type>
            </types>
        </registry>"#,
    );
    assert!(matches!(
        error,
        LoadError::InvalidExtensionStruct(name) if name == "VkBadExtension"
    ));
}

#[test]
fn direct_use_of_an_undefined_type_cannot_make_progress() {
    let error = load_err(
        r#"<registry>
            <types>
                <type category="struct" name="VkLonely">
                    <member><type>VkNeverDefined</type> <name>field</name></member>
                </type>
            </types>
        </registry>"#,
    );
    assert!(matches!(error, LoadError::NoProgress { name, .. } if name == "VkLonely"));
}

#[test]
fn duplicate_definitions_are_rejected() {
    let error = load_err(
        r#"<registry>
            <types>
                <type category="basetype">typedef <type>uint32_t</type> <name>VkFlags</name>;</type>
                <type category="basetype">typedef <type>uint32_t</type> <name>VkFlags</name>;</type>
            </types>
        </registry>"#,
    );
    assert!(matches!(error, LoadError::DuplicateDefinition(name) if name == "VkFlags"));

    let error = load_err(
        r#"<registry>
            <enums name="A">
                <enum value="1" name="VK_DUP"/>
            </enums>
            <enums name="B">
                <enum value="2" name="VK_DUP"/>
            </enums>
        </registry>"#,
    );
    assert!(matches!(error, LoadError::DuplicateDefinition(name) if name == "VK_DUP"));
}

#[test]
fn altlen_is_ignored_only_for_narrow_unsigned_pointees() {
    load(
        r#"<registry>
            <types>
                <type category="struct" name="VkOk">
                    <member><type>uint32_t</type> <name>rasterizationSamples</name></member>
                    <member len="latexmath:[\lceil{\mathit{rasterizationSamples} \over 32}\rceil]" altlen="(rasterizationSamples + 31) / 32">const <type>uint32_t</type>* <name>pSampleMask</name></member>
                </type>
            </types>
        </registry>"#,
    );

    let error = load_err(
        r#"<registry>
            <types>
                <type category="struct" name="VkBad">
                    <member><type>uint32_t</type> <name>count</name></member>
                    <member len="latexmath:[x]" altlen="x">const <type>float</type>* <name>pData</name></member>
                </type>
            </types>
        </registry>"#,
    );
    assert!(matches!(error, LoadError::UnexpectedMemberSyntax { .. }));
}

#[test]
fn command_aliases_share_the_resolved_function() {
    let catalog = load(
        r#"<registry>
            <commands>
                <command>
                    <proto><type>void</type> <name>vkTrimCommandPool</name></proto>
                    <param><type>uint32_t</type> <name>flags</name></param>
                </command>
                <command name="vkTrimCommandPoolKHR" alias="vkTrimCommandPool"/>
            </commands>
        </registry>"#,
    );
    assert_eq!(
        catalog.command_named("vkTrimCommandPoolKHR"),
        catalog.command_named("vkTrimCommandPool")
    );
    assert_eq!(
        catalog.sorted_command_names(),
        vec!["vkTrimCommandPool", "vkTrimCommandPoolKHR"]
    );
}

#[test]
fn sorted_outputs_are_lexicographic() {
    let catalog = load(
        r#"<registry>
            <types>
                <type category="basetype">typedef <type>uint32_t</type> <name>VkFlags</name>;</type>
                <type category="basetype">typedef <type>uint64_t</type> <name>VkDeviceSize</name>;</type>
            </types>
        </registry>"#,
    );
    let names = catalog.sorted_type_names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"VkDeviceSize"));
    assert!(names.contains(&"VkFlags"));
    // Platform seeds are part of the catalog contract.
    assert!(names.contains(&"uint32_t"));
    assert!(names.contains(&"wl_display"));
}

#[test]
fn vulkansc_members_are_excluded_from_layout() {
    let catalog = load(
        r#"<registry>
            <types>
                <type category="struct" name="VkMixed">
                    <member><type>uint32_t</type> <name>a</name></member>
                    <member api="vulkansc"><type>uint32_t</type> <name>scOnly</name></member>
                    <member><type>uint32_t</type> <name>b</name></member>
                </type>
            </types>
        </registry>"#,
    );
    let store = catalog.store();
    let id = catalog.type_named("VkMixed").unwrap();
    assert_eq!(store.num_fields(id, Arch::Arm), 2);
    assert_eq!(store.field(id, 1, Arch::Arm).name(), "b");
    assert_eq!(store.bits(id, Arch::Arm), 64);
}
