//! Built-in descriptor tables for the settings this crate manages.
//!
//! At-rest names must never change once released. Key names follow the
//! client's own option names.

use super::descriptor::{Descriptor, ExternalKey};
use super::SettingRegistry;
use crate::core::value::EnumTypeId;

/// Enumeration types used by the built-in catalog.
pub mod enums {
    use crate::core::value::EnumTypeId;

    pub const DUALSENSE_SPEAKER_SOUND: EnumTypeId = EnumTypeId::new(1);
    pub const SOUND_EQUALIZER: EnumTypeId = EnumTypeId::new(2);
    pub const CHARACTER_OBJECT_QUANTITY: EnumTypeId = EnumTypeId::new(3);
    pub const MOVEMENT_TYPE: EnumTypeId = EnumTypeId::new(4);
    pub const BATTLE_EFFECTS: EnumTypeId = EnumTypeId::new(5);
    pub const FLY_TEXT_SIZE: EnumTypeId = EnumTypeId::new(6);
    pub const POPUP_TEXT_SIZE: EnumTypeId = EnumTypeId::new(7);
    pub const SERVER_CLOCK_TYPE: EnumTypeId = EnumTypeId::new(8);
}

const THREE: &[u32] = &[0, 1, 2];
const FIVE: &[u32] = &[0, 1, 2, 3, 4];
const TWO: &[u32] = &[0, 1];

const fn sys(name: &'static str) -> ExternalKey {
    ExternalKey::system(name)
}

const fn cfg(name: &'static str) -> ExternalKey {
    ExternalKey::ui_config(name)
}

const fn ctl(name: &'static str) -> ExternalKey {
    ExternalKey::ui_control(name)
}

const fn volume(id: &'static str, key: &'static str) -> Descriptor {
    Descriptor::uint(id, sys(key), 0, 100)
}

const fn enumeration(id: &'static str, key: ExternalKey, ty: EnumTypeId, variants: &'static [u32]) -> Descriptor {
    Descriptor::enumeration(id, key, ty, variants)
}

/// System-domain settings.
pub const SYSTEM_SETTINGS: &[Descriptor] = &[
    // Sound while the client is inactive
    Descriptor::boolean("PlaySoundsWhenInactiveAll", sys("IsSoundAlways")),
    Descriptor::boolean("PlaySoundsWhenInactiveBgm", sys("IsSoundBgmAlways")),
    Descriptor::boolean("PlaySoundsWhenInactiveSfx", sys("IsSoundSeAlways")),
    Descriptor::boolean("PlaySoundsWhenInactiveVoice", sys("IsSoundVoiceAlways")),
    Descriptor::boolean("PlaySoundsWhenInactiveSystem", sys("IsSoundSystemAlways")),
    Descriptor::boolean("PlaySoundsWhenInactiveEnv", sys("IsSoundEnvAlways")),
    Descriptor::boolean("PlaySoundsWhenInactivePerform", sys("IsSoundPerformAlways")),
    // Music behaviour
    Descriptor::boolean("PlayMusicWhenMounted", sys("SoundChocobo")),
    Descriptor::boolean("EnableNormalBattleMusic", sys("SoundFieldBattle")),
    Descriptor::boolean("EnableCityMusicInResidentialAreas", sys("SoundHousing")),
    Descriptor::boolean("PlaySystemSoundsWaitingForDutyFinder", sys("SoundCfTimeCount")),
    volume("SoundListeningPosition", "SoundMicpos"),
    // Volume levels
    volume("MasterVolume", "SoundMaster"),
    volume("BgmVolume", "SoundBgm"),
    volume("SoundEffectVolume", "SoundSe"),
    volume("VoiceVolume", "SoundVoice"),
    volume("SystemSoundsVolume", "SoundSystem"),
    volume("AmbientSoundsVolume", "SoundEnv"),
    volume("PerformanceSoundsVolume", "SoundPerform"),
    volume("PlayerEffectsSelfVolume", "SoundPlayer"),
    volume("PlayerEffectsPartyVolume", "SoundParty"),
    volume("PlayerEffectsOtherPCsVolume", "SoundOther"),
    // Controller speaker
    enumeration("DualSenseSpeakerSoundType", sys("SoundPadSeType"), enums::DUALSENSE_SPEAKER_SOUND, THREE),
    volume("DualSenseSpeakerVolume", "SoundPad"),
    enumeration("SoundEqualizerMode", sys("SoundEqualizerType"), enums::SOUND_EQUALIZER, FIVE),
    // Display
    enumeration("CutsceneAndObjectQuantity", sys("DisplayObjectLimitType"), enums::CHARACTER_OBJECT_QUANTITY, FIVE),
    Descriptor::string("ScreenshotLocationDir", sys("ScreenShotDir"), 20, 200),
];

/// UI-domain settings.
pub const UI_SETTINGS: &[Descriptor] = &[
    enumeration("MoveMode", ctl("MoveMode"), enums::MOVEMENT_TYPE, TWO),
    enumeration("BattleEffectSelf", cfg("BattleEffectSelf"), enums::BATTLE_EFFECTS, THREE),
    enumeration("BattleEffectParty", cfg("BattleEffectParty"), enums::BATTLE_EFFECTS, THREE),
    enumeration("BattleEffectOther", cfg("BattleEffectOther"), enums::BATTLE_EFFECTS, THREE),
    enumeration("BattleEffectPvPOpponent", cfg("BattleEffectPvPEnemyPc"), enums::BATTLE_EFFECTS, THREE),
    Descriptor::uint("IdleAnimationDelay", cfg("IdleEmoteTime"), 0, 30),
    Descriptor::boolean("IdleEmoteRandomType", cfg("IdleEmoteRandomType")),
    // Shop confirmations
    Descriptor::boolean("ShopConfirmOnSell", cfg("ShopConfirm")),
    Descriptor::boolean("ShopConfirmMeldableItems", cfg("ShopConfirmMateria")),
    Descriptor::boolean("ShopConfirmSpiritbondMax", cfg("ShopConfirmSpiritBondMax")),
    Descriptor::boolean("ShopConfirmRareItem", cfg("ShopConfirmExRare")),
    Descriptor::boolean("EmoteDisplayLogMessage", cfg("EmoteTextType")),
    // HUD
    Descriptor::boolean("HudDisplayFlyingText", ctl("FlyTextDisp")),
    enumeration("HudFlyingTextSize", cfg("FlyTextDispSize"), enums::FLY_TEXT_SIZE, THREE),
    Descriptor::boolean("HudDisplayPopupText", ctl("PopUpTextDisp")),
    enumeration("HudPopupTextSize", cfg("PopUpTextDispSize"), enums::POPUP_TEXT_SIZE, THREE),
    Descriptor::boolean("HudDisplayParameterBars", ctl("CharaParamDisp")),
    Descriptor::boolean("HudDisplayExpBar", ctl("ExpDisp")),
    Descriptor::boolean("HudDisplayInventoryGrid", ctl("InventryStatusDisp")),
    Descriptor::boolean("HudDisplayDutyList", ctl("DutyListDisp")),
    Descriptor::uint("HudDisplayDutyCount", ctl("DutyListNumDisp"), 1, 10),
    Descriptor::boolean("HudDisplayDutyListInstanceDuty", ctl("InInstanceContentDutyListDisp")),
    Descriptor::boolean("HudDisplayDutyListNonInstanceDuty", ctl("InPublicContentDutyListDisp")),
    Descriptor::boolean("HudDisplayRegisteredDutiesTimers", ctl("ContentsInfoJoiningRequestDisp")),
    Descriptor::boolean("HudDisplayRegisteredDutyDetailTimers", ctl("ContentsInfoJoiningRequestSituationDisp")),
    Descriptor::boolean("HudDisplayMinimap", ctl("NaviMapDisp")),
    Descriptor::boolean("HudDisplayGil", ctl("GilStatusDisp")),
    Descriptor::boolean("HudDisplayServerInfo", ctl("InfoSettingDisp")),
    enumeration("HudDisplayServerClockType", ctl("InfoSettingDispType"), enums::SERVER_CLOCK_TYPE, THREE),
    Descriptor::boolean("HudDisplayServerInfoEorzeaTime", cfg("TimeEorzea")),
    Descriptor::boolean("HudDisplayServerInfoLocalTime", cfg("TimeLocal")),
    Descriptor::boolean("HudDisplayServerInfoServerTime", cfg("TimeServer")),
    Descriptor::boolean("HudDisplayServerInfoCurrentWorld", cfg("InfoSettingDispWorldNameType")),
    Descriptor::boolean("HudDisplayLimitGauge", ctl("LimitBreakGaugeDisp")),
    Descriptor::boolean("HudDisplayScenarioInfo", ctl("ScenarioTreeDisp")),
    Descriptor::boolean("HudHideScenarioComplete", ctl("ScenarioTreeCompleteDisp")),
    Descriptor::boolean("HudDisplayBattleTextPortraits", cfg("BattleTalkShowFace")),
    Descriptor::boolean("HudDisplayPartyList", ctl("PartyListDisp")),
    Descriptor::boolean("HudHidePartyListSolo", ctl("PartyListSoloOff")),
];

/// Registry with every built-in descriptor.
#[must_use]
pub fn builtin() -> SettingRegistry {
    let mut registry = SettingRegistry::new();
    for descriptor in SYSTEM_SETTINGS.iter().chain(UI_SETTINGS) {
        registry.register(*descriptor);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::Domain;

    #[test]
    fn test_builtin_registers_everything() {
        let registry = builtin();
        assert_eq!(registry.len(), SYSTEM_SETTINGS.len() + UI_SETTINGS.len());
        assert_eq!(registry.all(Domain::System).count(), SYSTEM_SETTINGS.len());
        assert_eq!(registry.all(Domain::Ui).count(), UI_SETTINGS.len());
    }

    #[test]
    fn test_tables_are_domain_pure() {
        assert!(SYSTEM_SETTINGS.iter().all(|d| d.domain() == Domain::System));
        assert!(UI_SETTINGS.iter().all(|d| d.domain() == Domain::Ui));
    }
}
